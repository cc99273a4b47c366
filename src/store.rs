use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{Result, RosterError};
use crate::models::{MemberRecord, RegistrationIndex, RosterStats};

/// Immutable roster snapshot: member records plus their registration IDs.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MemberRecord>,
    registrations: RegistrationIndex,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    pub fn new(records: Vec<MemberRecord>, registrations: RegistrationIndex) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), position).is_some() {
                return Err(RosterError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self {
            records,
            registrations,
            by_id,
        })
    }

    pub fn records(&self) -> &[MemberRecord] {
        &self.records
    }

    pub fn registrations(&self) -> &RegistrationIndex {
        &self.registrations
    }

    pub fn find(&self, id: &str) -> Option<&MemberRecord> {
        self.by_id.get(id).map(|&position| &self.records[position])
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-empty group labels, sorted.
    pub fn groups(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| !record.group.is_empty())
            .map(|record| record.group.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> RosterStats {
        let active_count = self
            .records
            .iter()
            .filter(|record| record.status.is_active())
            .count();
        let distinct_group_count = self
            .records
            .iter()
            .map(|record| record.group.as_str())
            .collect::<HashSet<_>>()
            .len();

        RosterStats {
            total: self.records.len(),
            active_count,
            inactive_count: self.records.len() - active_count,
            distinct_group_count,
        }
    }
}
