//! UI state derived from a selection: the bulk button and the header
//! checkbox of the current page.

use invdesk_model::RecordId;

use crate::store::{SelectionCount, SelectionStore};

/// Tri-state of the "select page" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckbox {
    Unchecked,
    Indeterminate,
    Checked,
}

/// What the bulk-delete button and header checkbox should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeState {
    pub visible: bool,
    pub label: String,
    pub count: SelectionCount,
    pub header: HeaderCheckbox,
}

impl BadgeState {
    /// Derive the badge for `page_ids`, the records currently rendered.
    ///
    /// `resolved` is the server's match count for an all-matching
    /// selection, when it has been fetched.
    pub fn from_selection(
        store: &SelectionStore,
        page_ids: &[RecordId],
        resolved: Option<u64>,
    ) -> Self {
        let count = store.count();
        let label = match (count, resolved) {
            (SelectionCount::Known(n), _) => format!("Delete ({n})"),
            (SelectionCount::Unknown, Some(n)) => format!("Delete (all pages: {n})"),
            (SelectionCount::Unknown, None) => "Delete (all pages)".to_string(),
        };
        let selected_on_page = page_ids.iter().filter(|id| store.contains(id)).count();
        let header = if page_ids.is_empty() || selected_on_page == 0 {
            HeaderCheckbox::Unchecked
        } else if selected_on_page == page_ids.len() {
            HeaderCheckbox::Checked
        } else {
            HeaderCheckbox::Indeterminate
        };
        Self {
            visible: !store.is_empty(),
            label,
            count,
            header,
        }
    }
}

#[cfg(test)]
mod tests {
    use invdesk_model::FilterSnapshot;

    use super::*;

    fn ids(values: &[&str]) -> Vec<RecordId> {
        values.iter().map(|v| RecordId::new(*v).unwrap()).collect()
    }

    #[test]
    fn empty_selection_hides_button() {
        let badge = BadgeState::from_selection(&SelectionStore::default(), &ids(&["1"]), None);
        assert!(!badge.visible);
        assert_eq!(badge.label, "Delete (0)");
        assert_eq!(badge.header, HeaderCheckbox::Unchecked);
    }

    #[test]
    fn partial_page_is_indeterminate() {
        let page = ids(&["1", "2", "3"]);
        let mut store = SelectionStore::default();
        store.toggle(page[1].clone());
        let badge = BadgeState::from_selection(&store, &page, None);
        assert!(badge.visible);
        assert_eq!(badge.label, "Delete (1)");
        assert_eq!(badge.header, HeaderCheckbox::Indeterminate);

        store.select_all_on_current_page(page.clone());
        let badge = BadgeState::from_selection(&store, &page, None);
        assert_eq!(badge.header, HeaderCheckbox::Checked);
    }

    #[test]
    fn all_matching_uses_resolved_count() {
        let mut store = SelectionStore::default();
        store.select_all_matching(FilterSnapshot::new("abc"));
        let page = ids(&["1", "2"]);
        assert_eq!(
            BadgeState::from_selection(&store, &page, Some(240)).label,
            "Delete (all pages: 240)"
        );
        let badge = BadgeState::from_selection(&store, &page, None);
        assert_eq!(badge.label, "Delete (all pages)");
        assert_eq!(badge.header, HeaderCheckbox::Checked);
    }
}
