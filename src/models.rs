use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("active") {
            MemberStatus::Active
        } else {
            MemberStatus::Inactive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Inactive => "Inactive",
        }
    }

    pub fn is_active(self) -> bool {
        self == MemberStatus::Active
    }
}

impl From<String> for MemberStatus {
    fn from(raw: String) -> Self {
        MemberStatus::parse(&raw)
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    pub status: MemberStatus,
    #[serde(default)]
    pub group: String,
    #[serde(default, alias = "joinDate")]
    pub join_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Registration IDs per member id. A member missing from the map has no IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationIndex(HashMap<String, Vec<String>>);

impl RegistrationIndex {
    pub fn ids_for(&self, member_id: &str) -> &[String] {
        self.0.get(member_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_for(&self, member_id: &str) -> usize {
        self.ids_for(member_id).len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for RegistrationIndex {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    #[value(alias = "date")]
    JoinDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum ViewMode {
    /// Card list, one block per member.
    #[default]
    Primary,
    /// Table, one line per member.
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub status: &'static str,
    pub active: bool,
    pub group: String,
    pub level: String,
    pub level_class: String,
    pub join_date: String,
    pub member_since: String,
    pub registration_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyReason {
    NoData,
    NoMatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub total: usize,
    pub active_count: usize,
    pub inactive_count: usize,
    pub distinct_group_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub mode: ViewMode,
    pub rows: Vec<DisplayRow>,
    pub empty: Option<EmptyReason>,
}
