//! Page-scoped selection state
//!
//! Selection is owned by the caller (the view layer) and fed the engine's
//! output; the engine itself never tracks it. Select-all operates on the
//! current page's items only, never on the full match set.

use std::collections::BTreeSet;

use crate::record::ProjectRecord;

/// A set of selected record ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given id is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip the selection state of one id
    pub fn toggle(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Whether every visible record is selected.
    ///
    /// An empty page is never "all selected".
    pub fn all_visible_selected(&self, items: &[ProjectRecord]) -> bool {
        let visible: Vec<String> = items.iter().filter_map(|r| r.id()).collect();
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    /// Toggle selection of the current page as a whole.
    ///
    /// If every visible record is already selected, deselect the visible
    /// ones (selections made on other pages survive); otherwise select all
    /// visible records.
    pub fn toggle_all_visible(&mut self, items: &[ProjectRecord]) {
        let visible: Vec<String> = items.iter().filter_map(|r| r.id()).collect();
        if self.all_visible_selected(items) {
            for id in &visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible);
        }
    }

    /// Drop ids no longer present in the match set.
    ///
    /// Called after a re-query so stale selections cannot target records
    /// the current filters exclude.
    pub fn retain_matched(&mut self, matched: &[ProjectRecord]) {
        let keep: BTreeSet<String> = matched.iter().filter_map(|r| r.id()).collect();
        self.ids.retain(|id| keep.contains(id));
    }

    /// Selected ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
