use serde::Serialize;

use crate::models::{MemberRecord, RegistrationIndex};

/// Member detail shown while the modal is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalPayload {
    pub record: MemberRecord,
    pub ids: Vec<String>,
}

impl ModalPayload {
    pub fn level_label(&self) -> &str {
        self.record
            .level
            .as_deref()
            .filter(|level| !level.is_empty())
            .unwrap_or("N/A")
    }

    pub fn category_label<'a>(&'a self, default_category: &'a str) -> &'a str {
        self.record
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(default_category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState<'a> {
    Closed,
    Open(&'a ModalPayload),
}

/// Where a click inside the modal overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
    CloseButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Ctrl(char),
}

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    current: Option<ModalPayload>,
}

impl ModalController {
    pub fn state(&self) -> ModalState<'_> {
        match &self.current {
            Some(payload) => ModalState::Open(payload),
            None => ModalState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn payload(&self) -> Option<&ModalPayload> {
        self.current.as_ref()
    }

    pub fn selected_record_id(&self) -> Option<&str> {
        self.payload().map(|payload| payload.record.id.as_str())
    }

    /// Opens on `record`, replacing whatever was shown before.
    pub fn open(&mut self, record: &MemberRecord, registrations: &RegistrationIndex) -> &ModalPayload {
        let ids = registrations.ids_for(&record.id).to_vec();
        if let Some(previous) = self.selected_record_id() {
            tracing::debug!(previous, next = %record.id, "replacing modal content");
        }
        tracing::debug!(id = %record.id, registrations = ids.len(), "modal opened");

        self.current.insert(ModalPayload {
            record: record.clone(),
            ids,
        })
    }

    /// Returns whether the modal was open.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        tracing::debug!(id = ?self.selected_record_id(), "modal closed");
        self.current = None;
        true
    }

    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseButton => self.close(),
            ClickTarget::Content => false,
        }
    }

    pub fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Escape => self.close(),
            _ => false,
        }
    }
}
