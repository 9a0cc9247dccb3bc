//! Applying a classified bulk outcome to the selection.
//!
//! The policy never guesses: when the outcome does not identify the removed
//! records, the selection is cleared and the current page is re-fetched so
//! the listing shows authoritative server state.

use invdesk_model::{BulkOperationResult, BulkTarget, FilterSnapshot, Notice, Page};
use invdesk_selection::SelectionStore;

use crate::endpoint::PagingCollaborator;
use crate::error::Result;

/// What the caller must do after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub notice: Notice,
    /// Re-fetch the current page before showing it again.
    pub refresh: bool,
    /// Ids dropped from the selection because the server confirmed them.
    pub discarded: usize,
}

/// Decides how a bulk outcome changes the selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationPolicy;

impl ReconciliationPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Update `store` for `result` and report what the view must do.
    pub fn apply(&self, result: &BulkOperationResult, store: &mut SelectionStore) -> Reconciliation {
        if result.ambiguous {
            tracing::warn!(
                removed = ?result.removed_count,
                requested = ?result.requested.requested_count(),
                "bulk outcome is ambiguous; clearing selection and refreshing"
            );
            store.clear();
            return Reconciliation {
                notice: Notice::warning(
                    "The server did not report exactly which records were deleted. \
                     The selection was cleared and the list reloaded.",
                ),
                refresh: true,
                discarded: 0,
            };
        }

        match &result.requested {
            BulkTarget::AllMatching(_) => {
                let removed = result.removed_count.unwrap_or_default();
                store.clear();
                Reconciliation {
                    notice: Notice::success(format!(
                        "Deleted {removed} {} matching the filter.",
                        records(removed)
                    )),
                    refresh: true,
                    discarded: 0,
                }
            }
            BulkTarget::Ids(requested) => {
                let discarded = result
                    .removed_ids
                    .as_ref()
                    .map_or(0, |removed| store.remove_confirmed(removed));
                let confirmed = result.removed_ids.as_ref().map_or(0, |r| r.len()) as u64;
                let remaining = result.unconfirmed_ids().len();
                if remaining == 0 {
                    Reconciliation {
                        notice: Notice::success(format!(
                            "Deleted {confirmed} {}.",
                            records(confirmed)
                        )),
                        refresh: false,
                        discarded,
                    }
                } else {
                    tracing::warn!(
                        confirmed,
                        requested = requested.len(),
                        remaining,
                        "server removed only part of the request"
                    );
                    Reconciliation {
                        notice: Notice::warning(format!(
                            "Deleted {confirmed} of {} records. {remaining} could not be \
                             deleted and remain selected.",
                            requested.len()
                        )),
                        refresh: true,
                        discarded,
                    }
                }
            }
        }
    }
}

fn records(n: u64) -> &'static str {
    if n == 1 { "record" } else { "records" }
}

/// Re-fetch `page` under `filter`, falling back to the previous page when
/// the current one came back empty and is not the first.
pub async fn refresh_page<P: PagingCollaborator>(
    paging: &P,
    page: u32,
    filter: &FilterSnapshot,
) -> Result<Page> {
    let current = paging.fetch_page(page, filter).await?;
    if current.is_empty() && page > 1 {
        tracing::debug!(page, "page emptied by delete; loading previous page");
        return paging.fetch_page(page - 1, filter).await;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use invdesk_model::{NoticeLevel, RecordId};

    use super::*;

    fn ids(values: &[&str]) -> BTreeSet<RecordId> {
        values.iter().map(|v| RecordId::new(*v).unwrap()).collect()
    }

    fn store_with(values: &[&str]) -> SelectionStore {
        let mut store = SelectionStore::default();
        store.select_all_on_current_page(ids(values));
        store
    }

    #[test]
    fn full_confirmation_needs_no_refresh() {
        let mut store = store_with(&["5", "9"]);
        let result = BulkOperationResult {
            requested: BulkTarget::Ids(ids(&["5", "9"])),
            removed_ids: Some(ids(&["5", "9"])),
            removed_count: Some(2),
            ambiguous: false,
        };
        let outcome = ReconciliationPolicy::new().apply(&result, &mut store);
        assert!(store.is_empty());
        assert!(!outcome.refresh);
        assert_eq!(outcome.discarded, 2);
        assert_eq!(outcome.notice.level, NoticeLevel::Success);
    }

    #[test]
    fn partial_removal_keeps_the_rest_selected() {
        let mut store = store_with(&["5", "9"]);
        let result = BulkOperationResult {
            requested: BulkTarget::Ids(ids(&["5", "9"])),
            removed_ids: Some(ids(&["5"])),
            removed_count: Some(1),
            ambiguous: false,
        };
        let outcome = ReconciliationPolicy::new().apply(&result, &mut store);
        assert_eq!(store.explicit_ids(), &ids(&["9"]));
        assert!(outcome.refresh);
        assert_eq!(outcome.notice.level, NoticeLevel::Warning);
    }

    #[test]
    fn ambiguous_clears_and_refreshes() {
        let mut store = store_with(&["5", "9"]);
        let result = BulkOperationResult {
            requested: BulkTarget::Ids(ids(&["5", "9"])),
            removed_ids: None,
            removed_count: Some(1),
            ambiguous: true,
        };
        let outcome = ReconciliationPolicy::new().apply(&result, &mut store);
        assert!(store.is_empty());
        assert!(outcome.refresh);
        assert_eq!(outcome.notice.level, NoticeLevel::Warning);
    }

    #[test]
    fn filter_delete_clears_and_refreshes() {
        let filter = FilterSnapshot::new("parafuso");
        let mut store = SelectionStore::new(filter.clone());
        store.select_all_matching(filter.clone());
        let result = BulkOperationResult {
            requested: BulkTarget::AllMatching(filter),
            removed_ids: None,
            removed_count: Some(1),
            ambiguous: false,
        };
        let outcome = ReconciliationPolicy::new().apply(&result, &mut store);
        assert!(!store.is_all_matching());
        assert!(outcome.refresh);
        assert_eq!(outcome.notice.message, "Deleted 1 record matching the filter.");
    }
}
