//! Search filter and selection over the record list.

use std::sync::Arc;

use crate::model::Gist;

use super::CollectionState;

impl CollectionState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.ensure_selection();
    }

    /// Records matching the current search, in list order.
    pub fn visible(&self) -> Vec<&Arc<Gist>> {
        self.records
            .iter()
            .filter(|g| self.search.is_empty() || g.matches_search(&self.search))
            .collect()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_record(&self) -> Option<&Arc<Gist>> {
        let visible = self.visible();
        let id = self.selected.as_deref()?;
        visible.into_iter().find(|g| g.id == id)
    }

    /// Selects `id` if it is visible.
    pub fn select(&mut self, id: &str) -> bool {
        if self.visible().iter().any(|g| g.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Moves the selection up or down the visible list, clamping at the ends.
    pub fn select_offset(&mut self, delta: isize) {
        let ids: Vec<String> = self.visible().iter().map(|g| g.id.clone()).collect();
        if ids.is_empty() {
            self.selected = None;
            return;
        }
        let cur = self
            .selected
            .as_deref()
            .and_then(|id| ids.iter().position(|x| x == id))
            .unwrap_or(0);
        let next = cur.saturating_add_signed(delta).min(ids.len() - 1);
        self.selected = Some(ids[next].clone());
    }

    /// Keeps the selection inside the visible set: the first visible record
    /// when the old one is gone, nothing when the set is empty.
    pub fn ensure_selection(&mut self) {
        let first = {
            let visible = self.visible();
            if visible.is_empty() {
                None
            } else if let Some(id) = self.selected.as_deref()
                && visible.iter().any(|g| g.id == id)
            {
                return;
            } else {
                Some(visible[0].id.clone())
            }
        };
        self.selected = first;
    }
}
