//! The selection state machine.
//!
//! A store is in one of two modes:
//!
//! - explicit: `ids` enumerates the selected records,
//! - all-matching: every record matching `filter` is selected and `ids` is
//!   empty.
//!
//! The modes never overlap. Entering all-matching clears `ids`; leaving it
//! (toggle, clear, filter change) clears the flag.

use std::collections::BTreeSet;
use std::fmt;

use invdesk_model::{BulkTarget, FilterSnapshot, RecordId};

use crate::error::{Result, SelectionError};

/// Number of selected records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCount {
    Known(usize),
    /// Every record matching the filter is selected; only the server knows
    /// how many that is.
    Unknown,
}

impl SelectionCount {
    pub fn known(self) -> Option<usize> {
        match self {
            Self::Known(count) => Some(count),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for SelectionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(count) => write!(f, "{count}"),
            Self::Unknown => f.write_str("all matching"),
        }
    }
}

/// What happened to the selection when the view's filter changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Unchanged,
    /// Explicit ids referred to the old result set and were dropped.
    ExplicitDiscarded { count: usize },
    /// The all-matching flag was cleared.
    AllMatchingInvalidated { previous: FilterSnapshot },
}

/// Records selected in one list view, across pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    ids: BTreeSet<RecordId>,
    all_matching: bool,
    filter: FilterSnapshot,
}

impl SelectionStore {
    /// Empty selection for a view showing `filter`.
    pub fn new(filter: FilterSnapshot) -> Self {
        Self {
            ids: BTreeSet::new(),
            all_matching: false,
            filter,
        }
    }

    pub(crate) fn from_parts(
        ids: BTreeSet<RecordId>,
        all_matching: bool,
        filter: FilterSnapshot,
    ) -> Self {
        Self {
            ids: if all_matching { BTreeSet::new() } else { ids },
            all_matching,
            filter,
        }
    }

    /// Flip one record. Returns whether it is selected afterwards.
    ///
    /// In all-matching mode every record counts as selected, so this
    /// deselects: the flag is cleared and the explicit set stays empty.
    /// "All except this one" has no representation.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.all_matching {
            tracing::debug!(id = %id, "toggle demoted all-matching selection");
            self.all_matching = false;
            self.ids.clear();
            return false;
        }
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Union the visible page's ids into the explicit set.
    ///
    /// In all-matching mode the page is already selected and nothing changes.
    pub fn select_all_on_current_page(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        if self.all_matching {
            return;
        }
        self.ids.extend(ids);
    }

    /// Remove the visible page's ids (header checkbox unchecked).
    ///
    /// In all-matching mode this demotes to an empty explicit selection,
    /// like [`toggle`](Self::toggle).
    pub fn deselect_page<'a>(&mut self, ids: impl IntoIterator<Item = &'a RecordId>) {
        if self.all_matching {
            self.all_matching = false;
            self.ids.clear();
            return;
        }
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Select every record matching `filter`, across all pages.
    pub fn select_all_matching(&mut self, filter: FilterSnapshot) {
        self.ids.clear();
        self.all_matching = true;
        self.filter = filter;
    }

    /// Empty the explicit set and clear the all-matching flag.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.all_matching = false;
    }

    /// Membership as far as the client knows. In all-matching mode every id
    /// is assumed selected; the authoritative list lives server-side.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.all_matching || self.ids.contains(id)
    }

    pub fn count(&self) -> SelectionCount {
        if self.all_matching {
            SelectionCount::Unknown
        } else {
            SelectionCount::Known(self.ids.len())
        }
    }

    pub fn is_all_matching(&self) -> bool {
        self.all_matching
    }

    pub fn is_empty(&self) -> bool {
        !self.all_matching && self.ids.is_empty()
    }

    /// Explicitly selected ids. Always empty in all-matching mode.
    pub fn explicit_ids(&self) -> &BTreeSet<RecordId> {
        &self.ids
    }

    /// The filter the view shows, or the one "select all" was made under.
    pub fn filter(&self) -> &FilterSnapshot {
        &self.filter
    }

    /// Record that the view now shows `filter`.
    ///
    /// Any selection made under a different filter is dropped: explicit ids
    /// would refer to another result set, and the all-matching flag must be
    /// re-issued for the new filter.
    pub fn set_filter(&mut self, filter: FilterSnapshot) -> FilterChange {
        if filter == self.filter {
            return FilterChange::Unchanged;
        }
        let previous = std::mem::replace(&mut self.filter, filter);
        if self.all_matching {
            self.all_matching = false;
            tracing::warn!(
                previous = %previous.fingerprint(),
                current = %self.filter.fingerprint(),
                "filter changed while all matching records were selected; selection cleared"
            );
            return FilterChange::AllMatchingInvalidated { previous };
        }
        let count = self.ids.len();
        self.ids.clear();
        if count > 0 {
            tracing::warn!(count, "filter changed; explicit selection discarded");
            FilterChange::ExplicitDiscarded { count }
        } else {
            FilterChange::Unchanged
        }
    }

    /// Verify an all-matching selection still applies to `current`.
    ///
    /// On mismatch the flag is cleared and the view adopts `current`.
    pub fn ensure_filter_current(&mut self, current: &FilterSnapshot) -> Result<()> {
        if !self.all_matching || &self.filter == current {
            return Ok(());
        }
        let selected_under = self.filter.fingerprint();
        self.set_filter(current.clone());
        Err(SelectionError::FilterInvalidated {
            selected_under,
            current: current.fingerprint(),
        })
    }

    /// Drop ids the server confirmed removed. Returns how many were dropped.
    pub fn remove_confirmed(&mut self, removed: &BTreeSet<RecordId>) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| !removed.contains(id));
        before - self.ids.len()
    }

    /// The bulk target this selection describes, `None` when nothing is
    /// selected.
    pub fn target(&self) -> Option<BulkTarget> {
        if self.all_matching {
            Some(BulkTarget::AllMatching(self.filter.clone()))
        } else if self.ids.is_empty() {
            None
        } else {
            Some(BulkTarget::Ids(self.ids.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> RecordId {
        RecordId::new(value).unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut store = SelectionStore::default();
        assert!(store.toggle(id("5")));
        assert!(store.contains(&id("5")));
        assert!(!store.toggle(id("5")));
        assert!(store.is_empty());
    }

    #[test]
    fn select_all_matching_clears_explicit_ids() {
        let mut store = SelectionStore::default();
        store.select_all_on_current_page([id("5"), id("9")]);
        store.select_all_matching(FilterSnapshot::new("abc"));
        assert!(store.explicit_ids().is_empty());
        assert_eq!(store.count(), SelectionCount::Unknown);
        assert!(store.contains(&id("12345")));
    }

    #[test]
    fn toggle_demotes_all_matching() {
        let mut store = SelectionStore::default();
        store.select_all_matching(FilterSnapshot::new("abc"));
        assert!(!store.toggle(id("5")));
        assert!(!store.is_all_matching());
        assert_eq!(store.count(), SelectionCount::Known(0));
        assert!(!store.contains(&id("9")));
    }

    #[test]
    fn filter_change_invalidates_all_matching() {
        let mut store = SelectionStore::default();
        store.select_all_on_current_page([id("5"), id("9")]);
        store.select_all_matching(FilterSnapshot::new("abc"));
        let change = store.set_filter(FilterSnapshot::new("xyz"));
        assert_eq!(
            change,
            FilterChange::AllMatchingInvalidated {
                previous: FilterSnapshot::new("abc")
            }
        );
        assert!(!store.is_all_matching());
        assert!(store.explicit_ids().is_empty());
        assert_eq!(store.count(), SelectionCount::Known(0));
    }

    #[test]
    fn filter_change_discards_explicit_ids() {
        let mut store = SelectionStore::default();
        store.select_all_on_current_page([id("1"), id("2")]);
        assert_eq!(
            store.set_filter(FilterSnapshot::new("x")),
            FilterChange::ExplicitDiscarded { count: 2 }
        );
        assert!(store.is_empty());
        assert_eq!(
            store.set_filter(FilterSnapshot::new("x")),
            FilterChange::Unchanged
        );
    }

    #[test]
    fn ensure_filter_current_reports_and_clears() {
        let mut store = SelectionStore::default();
        store.select_all_matching(FilterSnapshot::new("abc"));
        assert!(store.ensure_filter_current(&FilterSnapshot::new("abc")).is_ok());
        let err = store
            .ensure_filter_current(&FilterSnapshot::new("xyz"))
            .unwrap_err();
        assert!(matches!(err, SelectionError::FilterInvalidated { .. }));
        assert!(!store.is_all_matching());
        assert_eq!(store.filter(), &FilterSnapshot::new("xyz"));
    }

    #[test]
    fn deselect_page_removes_only_page_ids() {
        let mut store = SelectionStore::default();
        store.select_all_on_current_page([id("1"), id("2"), id("3")]);
        store.deselect_page(&[id("1"), id("2")]);
        assert_eq!(store.count(), SelectionCount::Known(1));
        assert!(store.contains(&id("3")));
    }

    #[test]
    fn remove_confirmed_keeps_the_rest() {
        let mut store = SelectionStore::default();
        store.select_all_on_current_page([id("5"), id("9"), id("11")]);
        let removed = BTreeSet::from([id("5"), id("9"), id("404")]);
        assert_eq!(store.remove_confirmed(&removed), 2);
        assert_eq!(store.explicit_ids(), &BTreeSet::from([id("11")]));
    }

    #[test]
    fn target_reflects_mode() {
        let mut store = SelectionStore::default();
        assert_eq!(store.target(), None);
        store.toggle(id("5"));
        assert_eq!(
            store.target(),
            Some(BulkTarget::Ids(BTreeSet::from([id("5")])))
        );
        store.select_all_matching(FilterSnapshot::new("abc"));
        assert_eq!(
            store.target(),
            Some(BulkTarget::AllMatching(FilterSnapshot::new("abc")))
        );
    }
}
