use std::fmt::Write;

use crate::modal::ModalPayload;
use crate::models::{EmptyReason, RosterStats, RosterView, ViewMode};
use crate::view;

pub fn build_listing(roster: &RosterView) -> String {
    let mut output = String::new();

    match roster.empty {
        Some(EmptyReason::NoData) => {
            let _ = writeln!(output, "No members loaded.");
            return output;
        }
        Some(EmptyReason::NoMatch) => {
            let _ = writeln!(output, "No members match the current search.");
            return output;
        }
        None => {}
    }

    match roster.mode {
        ViewMode::Primary => {
            for row in &roster.rows {
                let _ = writeln!(output, "[{}] {}", row.initials, row.name);
                let _ = writeln!(output, "     {} | {} | {}", row.id, row.level, row.group);
                let _ = writeln!(
                    output,
                    "     {} | {} IDs | joined {} {}",
                    row.status, row.registration_count, row.join_date, row.member_since
                );
                let _ = writeln!(output);
            }
        }
        ViewMode::Compact => {
            let _ = writeln!(
                output,
                "{:<4} {:<8} {:<24} {:<10} {:<8} {:<9} {:>4}",
                "", "ID", "NAME", "GROUP", "LEVEL", "STATUS", "IDS"
            );
            for row in &roster.rows {
                let _ = writeln!(
                    output,
                    "{:<4} {:<8} {:<24} {:<10} {:<8} {:<9} {:>4}",
                    row.initials,
                    row.id,
                    row.name,
                    row.group,
                    row.level,
                    row.status,
                    row.registration_count
                );
            }
        }
    }

    let _ = writeln!(output, "{} member(s) shown", roster.rows.len());
    output
}

pub fn build_member_detail(payload: &ModalPayload, default_category: &str) -> String {
    let record = &payload.record;
    let mut output = String::new();

    let _ = writeln!(output, "## {} ({})", record.name, payload.level_label());
    let _ = writeln!(output, "ID:                {}", record.id);
    let _ = writeln!(output, "Category:          {}", payload.category_label(default_category));
    let _ = writeln!(output, "Status:            {}", record.status);
    let _ = writeln!(
        output,
        "Registration Date: {}",
        view::format_join_date(record.join_date.as_deref())
    );
    let _ = writeln!(output, "Group:             {}", record.group);
    let _ = writeln!(output);
    let _ = writeln!(output, "Registered IDs ({})", payload.ids.len());

    if payload.ids.is_empty() {
        let _ = writeln!(output, "No registered IDs found");
    } else {
        for id in &payload.ids {
            let _ = writeln!(output, "- {id}");
        }
    }

    output
}

pub fn build_stats(stats: &RosterStats) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total members:   {}", stats.total);
    let _ = writeln!(output, "Active:          {}", stats.active_count);
    let _ = writeln!(output, "Inactive:        {}", stats.inactive_count);
    let _ = writeln!(output, "Distinct groups: {}", stats.distinct_group_count);
    output
}

pub fn build_groups(groups: &[String]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "All Groups");
    for group in groups {
        let _ = writeln!(output, "- {group}");
    }
    output
}
