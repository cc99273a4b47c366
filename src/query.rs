use crate::models::{SortDirection, SortKey, ViewMode};

/// Current search, filter, sort and layout selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    group_filter: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    view_mode: ViewMode,
}

impl QueryState {
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn group_filter(&self) -> &str {
        &self.group_filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.trim().to_lowercase();
    }

    pub fn clear_search(&mut self) {
        self.search_text.clear();
    }

    /// An empty group means all groups.
    pub fn set_group_filter(&mut self, group: &str) {
        self.group_filter = group.to_string();
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
    }

    pub fn set_view(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn is_filtering(&self) -> bool {
        !self.search_text.is_empty() || !self.group_filter.is_empty()
    }
}
