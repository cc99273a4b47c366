use chrono::{DateTime, Utc};

use crate::engine::parse_join_date;
use crate::models::{DisplayRow, MemberRecord, RegistrationIndex, ViewMode};

pub const DEFAULT_LEVEL: &str = "NEWBIE";
const MISSING_DATE: &str = "N/A";
const SECONDS_PER_DAY: i64 = 86_400;

/// Builds display rows for the visible records. `mode` only picks the layout
/// downstream; every mode gets the same fields.
pub fn project(
    visible: &[MemberRecord],
    registrations: &RegistrationIndex,
    mode: ViewMode,
    now: DateTime<Utc>,
) -> Vec<DisplayRow> {
    tracing::trace!(rows = visible.len(), ?mode, "projecting display rows");
    visible
        .iter()
        .map(|record| display_row(record, registrations, now))
        .collect()
}

fn display_row(record: &MemberRecord, registrations: &RegistrationIndex, now: DateTime<Utc>) -> DisplayRow {
    let level = level_label(record);
    DisplayRow {
        id: record.id.clone(),
        name: record.name.clone(),
        initials: initials(&record.name),
        status: record.status.label(),
        active: record.status.is_active(),
        group: record.group.clone(),
        level_class: level.to_lowercase(),
        level: level.to_string(),
        join_date: format_join_date(record.join_date.as_deref()),
        member_since: member_since(record.join_date.as_deref(), now),
        registration_count: registrations.count_for(&record.id),
    }
}

pub fn level_label(record: &MemberRecord) -> &str {
    record
        .level
        .as_deref()
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
}

pub fn initials(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => "?".to_string(),
        [only] => only.chars().take(2).flat_map(char::to_uppercase).collect(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
    }
}

/// `Jan 10, 2025` style. Absent dates render `N/A`; unparseable ones render as given.
pub fn format_join_date(raw: Option<&str>) -> String {
    match raw.filter(|raw| !raw.trim().is_empty()) {
        None => MISSING_DATE.to_string(),
        Some(raw) => match parse_join_date(raw) {
            Some(joined) => joined.format("%b %-d, %Y").to_string(),
            None => raw.to_string(),
        },
    }
}

/// Relative membership age, e.g. `(3 months ago)`. Empty when the date is absent
/// or unparseable.
pub fn member_since(raw: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(joined) = raw.and_then(parse_join_date) else {
        return String::new();
    };

    let elapsed = (now - joined).num_seconds().abs();
    let days = (elapsed + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;

    if days < 30 {
        format!("({days} days ago)")
    } else if days < 365 {
        let months = days / 30;
        format!("({months} {} ago)", plural(months, "month"))
    } else {
        let years = days / 365;
        format!("({years} {} ago)", plural(years, "year"))
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberStatus;
    use crate::store::tests::member;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn joined_plus(days: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap() + Duration::days(days)
    }

    #[test]
    fn member_since_buckets() {
        let joined = Some("2025-01-10");
        assert_eq!(member_since(joined, joined_plus(5)), "(5 days ago)");
        assert_eq!(member_since(joined, joined_plus(40)), "(1 month ago)");
        assert_eq!(member_since(joined, joined_plus(95)), "(3 months ago)");
        assert_eq!(member_since(joined, joined_plus(400)), "(1 year ago)");
        assert_eq!(member_since(joined, joined_plus(800)), "(2 years ago)");
    }

    #[test]
    fn member_since_rounds_partial_days_up() {
        let now = joined_plus(5) + Duration::hours(3);
        assert_eq!(member_since(Some("2025-01-10"), now), "(6 days ago)");
    }

    #[test]
    fn member_since_keeps_time_of_day() {
        let now = joined_plus(5);
        assert_eq!(member_since(Some("2025-01-09T12:00:00Z"), now), "(6 days ago)");
        assert_eq!(member_since(Some("2025-01-09T19:00:00-05:00"), now), "(5 days ago)");
    }

    #[test]
    fn member_since_is_empty_without_a_usable_date() {
        assert_eq!(member_since(None, joined_plus(5)), "");
        assert_eq!(member_since(Some("soon"), joined_plus(5)), "");
    }

    #[test]
    fn initials_follow_name_tokens() {
        assert_eq!(initials("Reno ade Putra"), "RP");
        assert_eq!(initials("Deasy"), "DE");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials(""), "?");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn join_date_formatting_falls_back() {
        assert_eq!(format_join_date(Some("2025-01-10")), "Jan 10, 2025");
        assert_eq!(format_join_date(None), "N/A");
        assert_eq!(format_join_date(Some("")), "N/A");
        assert_eq!(format_join_date(Some("sometime 2024")), "sometime 2024");
    }

    #[test]
    fn projects_derived_fields() {
        let mut inactive = member("M01", "Deasy Fathira", "MIO88", None);
        inactive.status = MemberStatus::Inactive;
        inactive.level = Some("VIP".to_string());
        let records = vec![member("O01", "Reno ade Putra", "OKTO88", Some("2025-01-10")), inactive];
        let registrations: RegistrationIndex = [(
            "O01".to_string(),
            vec!["ID8891".to_string(), "ID8892".to_string(), "ID8893".to_string()],
        )]
        .into_iter()
        .collect();

        let rows = project(&records, &registrations, ViewMode::Primary, joined_plus(40));

        assert_eq!(
            rows[0],
            DisplayRow {
                id: "O01".to_string(),
                name: "Reno ade Putra".to_string(),
                initials: "RP".to_string(),
                status: "Active",
                active: true,
                group: "OKTO88".to_string(),
                level: "NEWBIE".to_string(),
                level_class: "newbie".to_string(),
                join_date: "Jan 10, 2025".to_string(),
                member_since: "(1 month ago)".to_string(),
                registration_count: 3,
            }
        );
        assert_eq!(rows[1].status, "Inactive");
        assert!(!rows[1].active);
        assert_eq!(rows[1].level, "VIP");
        assert_eq!(rows[1].join_date, "N/A");
        assert_eq!(rows[1].member_since, "");
        assert_eq!(rows[1].registration_count, 0);
    }

    #[test]
    fn view_mode_does_not_change_rows() {
        let records = vec![member("O01", "Reno ade Putra", "OKTO88", Some("2025-01-10"))];
        let registrations = RegistrationIndex::default();
        assert_eq!(
            project(&records, &registrations, ViewMode::Primary, joined_plus(5)),
            project(&records, &registrations, ViewMode::Compact, joined_plus(5))
        );
    }
}
