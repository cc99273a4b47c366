use chrono::{DateTime, Utc};

use crate::engine;
use crate::error::{Result, RosterError};
use crate::modal::{ClickTarget, Key, ModalController, ModalPayload, ModalState};
use crate::models::{RosterStats, RosterView, SortKey, ViewMode};
use crate::query::QueryState;
use crate::store::RecordStore;
use crate::view;

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Failed(String),
    Ready(RecordStore),
}

impl LoadState {
    fn store(&self) -> Result<&RecordStore> {
        match self {
            LoadState::Ready(store) => Ok(store),
            LoadState::Pending => Err(RosterError::NotReady("data has not been loaded".to_string())),
            LoadState::Failed(reason) => Err(RosterError::NotReady(reason.clone())),
        }
    }
}

/// Owns the roster data and every piece of view state. Each intent runs to
/// completion; rows are recomputed from scratch on every `snapshot`.
#[derive(Debug, Default)]
pub struct RosterApp {
    data: LoadState,
    query: QueryState,
    modal: ModalController,
}

impl RosterApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a freshly loaded roster, replacing any previous one.
    pub fn install(&mut self, store: RecordStore) {
        tracing::info!(
            records = store.records().len(),
            registrations = store.registrations().len(),
            "roster installed"
        );
        self.modal.close();
        self.data = LoadState::Ready(store);
    }

    pub fn fail(&mut self, reason: impl std::fmt::Display) {
        let reason = reason.to_string();
        tracing::error!(%reason, "roster load failed");
        self.modal.close();
        self.data = LoadState::Failed(reason);
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    fn store(&self) -> Result<&RecordStore> {
        self.data.store()
    }

    pub fn search(&mut self, text: &str) {
        self.query.set_search(text);
        tracing::debug!(search = self.query.search_text(), "search updated");
    }

    pub fn filter_by_group(&mut self, group: &str) {
        self.query.set_group_filter(group);
        tracing::debug!(group, "group filter updated");
    }

    pub fn sort(&mut self, key: SortKey) {
        self.query.toggle_sort(key);
        tracing::debug!(
            key = ?self.query.sort_key(),
            direction = ?self.query.sort_direction(),
            "sort updated"
        );
    }

    pub fn switch_view(&mut self, mode: ViewMode) {
        self.query.set_view(mode);
        tracing::debug!(?mode, "view switched");
    }

    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    pub fn select_record(&mut self, id: &str) -> Result<&ModalPayload> {
        let store = self.data.store()?;
        let record = store
            .find(id)
            .ok_or_else(|| RosterError::UnknownRecord(id.to_string()))?;
        Ok(self.modal.open(record, store.registrations()))
    }

    pub fn dismiss_modal(&mut self) -> bool {
        self.modal.close()
    }

    pub fn click(&mut self, target: ClickTarget) -> bool {
        self.modal.handle_click(target)
    }

    /// Keyboard shortcuts: `Ctrl+1`/`Ctrl+2` switch layout, `Escape` closes the
    /// modal or, with no modal open, clears the search.
    pub fn press(&mut self, key: Key) -> bool {
        match key {
            Key::Escape if self.modal.is_open() => self.modal.handle_key(key),
            Key::Escape => {
                let had_search = !self.query.search_text().is_empty();
                self.query.clear_search();
                had_search
            }
            Key::Ctrl('1') => {
                self.switch_view(ViewMode::Primary);
                true
            }
            Key::Ctrl('2') => {
                self.switch_view(ViewMode::Compact);
                true
            }
            _ => false,
        }
    }

    pub fn modal(&self) -> ModalState<'_> {
        self.modal.state()
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Result<RosterView> {
        let store = self.store()?;
        let visible = engine::compute_visible(store.records(), &self.query);
        let empty = engine::empty_state(!store.is_empty(), &self.query, visible.len());
        let mode = self.query.view_mode();

        Ok(RosterView {
            mode,
            rows: view::project(&visible, store.registrations(), mode, now),
            empty,
        })
    }

    pub fn stats(&self) -> Result<RosterStats> {
        Ok(self.store()?.stats())
    }

    pub fn groups(&self) -> Result<Vec<String>> {
        Ok(self.store()?.groups())
    }
}
