use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{EmptyReason, MemberRecord, SortDirection, SortKey};
use crate::query::QueryState;

/// Filters and orders `records` for the given query. Ties keep their input order.
pub fn compute_visible(records: &[MemberRecord], query: &QueryState) -> Vec<MemberRecord> {
    let mut visible: Vec<MemberRecord> = records
        .iter()
        .filter(|record| matches(record, query))
        .cloned()
        .collect();

    let key = query.sort_key();
    let direction = query.sort_direction();
    visible.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    visible
}

pub fn matches(record: &MemberRecord, query: &QueryState) -> bool {
    let search = query.search_text();
    let matches_search = search.is_empty()
        || record.name.to_lowercase().contains(search)
        || record.id.to_lowercase().contains(search);

    let group = query.group_filter();
    let matches_group = group.is_empty() || record.group == group;

    matches_search && matches_group
}

pub fn compare(a: &MemberRecord, b: &MemberRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        // `None` orders before `Some`: missing and unparseable dates sort earliest.
        SortKey::JoinDate => join_date_of(a).cmp(&join_date_of(b)),
    }
}

fn join_date_of(record: &MemberRecord) -> Option<DateTime<Utc>> {
    record.join_date.as_deref().and_then(parse_join_date)
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_join_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Why a pass produced no rows, if it produced none.
pub fn empty_state(has_data: bool, query: &QueryState, visible_len: usize) -> Option<EmptyReason> {
    if visible_len > 0 {
        return None;
    }
    if has_data && query.is_filtering() {
        Some(EmptyReason::NoMatch)
    } else {
        Some(EmptyReason::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::member;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn ids(records: &[MemberRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    fn roster() -> Vec<MemberRecord> {
        vec![
            member("O02", "bima Santoso", "OKTO88", Some("2025-03-01")),
            member("M01", "Deasy Fathira", "MIO88", Some("2025-06-25")),
            member("O01", "Reno ade Putra", "OKTO88", Some("2025-01-10")),
            member("M02", "Andi", "MIO88", None),
        ]
    }

    #[test]
    fn default_query_sorts_by_id_ascending() {
        let visible = compute_visible(&roster(), &QueryState::default());
        assert_eq!(ids(&visible), vec!["M01", "M02", "O01", "O02"]);
    }

    #[test]
    fn search_matches_name_or_id_case_insensitively() {
        let mut query = QueryState::default();
        query.set_search("RENO");
        assert_eq!(ids(&compute_visible(&roster(), &query)), vec!["O01"]);

        query.set_search("m0");
        assert_eq!(ids(&compute_visible(&roster(), &query)), vec!["M01", "M02"]);
    }

    #[test]
    fn group_filter_is_exact_and_case_sensitive() {
        let mut query = QueryState::default();
        query.set_group_filter("OKTO88");
        assert_eq!(ids(&compute_visible(&roster(), &query)), vec!["O01", "O02"]);

        query.set_group_filter("okto88");
        assert!(compute_visible(&roster(), &query).is_empty());
    }

    #[test]
    fn search_and_group_must_both_hold() {
        let mut query = QueryState::default();
        query.set_search("a");
        query.set_group_filter("MIO88");
        assert_eq!(ids(&compute_visible(&roster(), &query)), vec!["M01", "M02"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut query = QueryState::default();
        query.toggle_sort(SortKey::Name);
        assert_eq!(
            ids(&compute_visible(&roster(), &query)),
            vec!["M02", "O02", "M01", "O01"]
        );
    }

    #[test]
    fn join_date_sort_puts_missing_dates_first() {
        let mut records = roster();
        records.push(member("X01", "Broken", "MIO88", Some("not a date")));
        let mut query = QueryState::default();
        query.toggle_sort(SortKey::JoinDate);
        assert_eq!(
            ids(&compute_visible(&records, &query)),
            vec!["M02", "X01", "O01", "O02", "M01"]
        );
    }

    #[test]
    fn descending_keeps_tie_order() {
        let records = vec![
            member("A", "Same", "G", Some("2025-01-01")),
            member("B", "Other", "G", Some("2025-02-01")),
            member("C", "Same", "G", Some("2025-01-01")),
        ];
        let mut query = QueryState::default();
        query.set_sort(SortKey::JoinDate, SortDirection::Descending);
        assert_eq!(ids(&compute_visible(&records, &query)), vec!["B", "A", "C"]);

        query.set_sort(SortKey::Name, SortDirection::Descending);
        assert_eq!(ids(&compute_visible(&records, &query)), vec!["A", "C", "B"]);
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        use chrono::TimeZone;

        assert_eq!(
            parse_join_date("2025-01-10"),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_join_date("2025-01-10T23:30:00-05:00"),
            Some(Utc.with_ymd_and_hms(2025, 1, 11, 4, 30, 0).unwrap())
        );
        assert_eq!(parse_join_date("10/01/2025"), None);
    }

    #[test]
    fn join_date_sort_compares_instants_across_offsets() {
        let records = vec![
            member("A", "A", "G", Some("2025-01-10T23:30:00-05:00")),
            member("B", "B", "G", Some("2025-01-11T01:00:00+00:00")),
            member("C", "C", "G", Some("2025-01-11T09:00:00Z")),
            member("D", "D", "G", Some("2025-01-11T02:00:00Z")),
            member("E", "E", "G", Some("2025-01-11")),
        ];
        let mut query = QueryState::default();
        query.toggle_sort(SortKey::JoinDate);
        assert_eq!(
            ids(&compute_visible(&records, &query)),
            vec!["E", "B", "D", "A", "C"]
        );

        query.toggle_sort(SortKey::JoinDate);
        assert_eq!(
            ids(&compute_visible(&records, &query)),
            vec!["C", "A", "D", "B", "E"]
        );
    }

    #[test]
    fn empty_records_give_empty_output_and_no_data() {
        let mut query = QueryState::default();
        assert!(compute_visible(&[], &query).is_empty());
        assert_eq!(empty_state(false, &query, 0), Some(EmptyReason::NoData));

        query.set_search("anything");
        assert_eq!(empty_state(false, &query, 0), Some(EmptyReason::NoData));
    }

    #[test]
    fn unmatched_search_reports_no_match() {
        let mut query = QueryState::default();
        query.set_search("ID8891");
        let visible = compute_visible(&roster(), &query);
        assert!(visible.is_empty());
        assert_eq!(empty_state(true, &query, visible.len()), Some(EmptyReason::NoMatch));
        assert_eq!(empty_state(true, &query, 1), None);
    }

    fn arb_records() -> impl Strategy<Value = Vec<MemberRecord>> {
        prop::collection::vec(
            (
                "[a-zA-Z ]{0,10}",
                prop::option::of((2020i32..2026, 1u32..13, 1u32..29)),
                any::<u16>(),
            ),
            0..24,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(position, (name, date, salt))| {
                    let date = date.map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"));
                    member(
                        &format!("R{salt:05}-{position}"),
                        &name,
                        "G",
                        date.as_deref(),
                    )
                })
                .collect()
        })
    }

    fn arb_key() -> impl Strategy<Value = SortKey> {
        prop_oneof![Just(SortKey::Id), Just(SortKey::Name), Just(SortKey::JoinDate)]
    }

    proptest! {
        #[test]
        fn unfiltered_output_is_a_permutation(records in arb_records(), key in arb_key(), descending in any::<bool>()) {
            let mut query = QueryState::default();
            let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
            query.set_sort(key, direction);

            let mut visible = ids(&compute_visible(&records, &query)).into_iter().map(str::to_string).collect::<Vec<_>>();
            let mut original = records.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
            visible.sort();
            original.sort();
            prop_assert_eq!(visible, original);
        }

        #[test]
        fn id_descending_reverses_ascending(records in arb_records()) {
            let mut query = QueryState::default();
            let ascending = compute_visible(&records, &query);

            query.toggle_sort(SortKey::Id);
            let mut descending = compute_visible(&records, &query);
            descending.reverse();
            prop_assert_eq!(&descending, &ascending);

            query.toggle_sort(SortKey::Id);
            prop_assert_eq!(compute_visible(&records, &query), ascending);
        }

        #[test]
        fn output_is_deterministic(records in arb_records(), key in arb_key(), search in "[a-z]{0,2}") {
            let mut query = QueryState::default();
            query.set_sort(key, SortDirection::Ascending);
            query.set_search(&search);
            prop_assert_eq!(compute_visible(&records, &query), compute_visible(&records, &query));
        }
    }
}
