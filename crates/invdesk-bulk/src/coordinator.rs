//! Running a bulk delete from click to refreshed page.

use invdesk_mask::normalize_search_term;
use invdesk_model::{BulkOperationResult, BulkRequest, BulkTarget, FilterSnapshot, Notice, Page};
use invdesk_selection::{SelectionHandle, SelectionStore};

use crate::classify::classify;
use crate::endpoint::{MutationEndpoint, PagingCollaborator};
use crate::error::Result;
use crate::reconcile::{ReconciliationPolicy, refresh_page};
use crate::trigger::BulkTrigger;

/// Everything the view needs after [`BulkOperationCoordinator::run`].
#[derive(Debug, Clone, Default)]
pub struct BulkReport {
    /// `None` when nothing was selected and no request was sent.
    pub result: Option<BulkOperationResult>,
    pub notices: Vec<Notice>,
    /// The re-fetched page, when reconciliation asked for one and it loaded.
    pub refreshed: Option<Page>,
}

/// Issues bulk deletes for a selection and reconciles the outcome.
#[derive(Debug)]
pub struct BulkOperationCoordinator<E, P> {
    endpoint: E,
    paging: P,
    trigger: BulkTrigger,
    policy: ReconciliationPolicy,
}

impl<E, P> BulkOperationCoordinator<E, P>
where
    E: MutationEndpoint,
    P: PagingCollaborator,
{
    pub fn new(endpoint: E, paging: P) -> Self {
        Self {
            endpoint,
            paging,
            trigger: BulkTrigger::new(),
            policy: ReconciliationPolicy::new(),
        }
    }

    /// Share a trigger with the control that starts the operation.
    #[must_use]
    pub fn with_trigger(mut self, trigger: BulkTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn trigger(&self) -> &BulkTrigger {
        &self.trigger
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn paging(&self) -> &P {
        &self.paging
    }

    /// Send the delete `selection` describes and classify the response.
    ///
    /// An empty selection is a no-op that never reaches the endpoint.
    /// The selection itself is not modified.
    pub async fn execute(&self, selection: &SelectionStore) -> Result<Option<BulkOperationResult>> {
        let Some(target) = selection.target() else {
            tracing::debug!("nothing selected; skipping bulk delete");
            return Ok(None);
        };

        let request = request_for(&target);
        let response = self.endpoint.delete(&request).await?;
        let result = classify(target, &response)?;
        tracing::info!(
            requested = ?result.requested.requested_count(),
            removed = ?result.removed_count,
            ambiguous = result.ambiguous,
            "bulk delete completed"
        );
        Ok(Some(result))
    }

    /// How many records match `filter`, for the all-pages badge.
    pub async fn count_matching(&self, filter: &FilterSnapshot) -> Result<u64> {
        self.endpoint.count_matching(filter).await
    }

    /// The full sequence behind a bulk-delete click: disable the trigger,
    /// check the filter, send, classify, update the selection, refresh the
    /// page, re-enable the trigger.
    ///
    /// On error the selection is left as it was, except that an
    /// all-matching selection made under a stale filter is dropped.
    pub async fn run(
        &self,
        handle: &SelectionHandle,
        page: u32,
        current_filter: &FilterSnapshot,
    ) -> Result<BulkReport> {
        let _guard = self.trigger.acquire()?;

        handle.update(|store| store.ensure_filter_current(current_filter))?;

        let selection = handle.snapshot();
        let Some(result) = self.execute(&selection).await? else {
            return Ok(BulkReport {
                notices: vec![Notice::info("Nothing is selected.")],
                ..BulkReport::default()
            });
        };

        let reconciliation = handle.update(|store| self.policy.apply(&result, store));
        let mut notices = vec![reconciliation.notice];

        let refreshed = if reconciliation.refresh {
            match refresh_page(&self.paging, page, current_filter).await {
                Ok(page) => Some(page),
                Err(err) => {
                    tracing::warn!(error = %err, "page refresh after bulk delete failed");
                    notices.push(Notice::error(err.user_message()));
                    None
                }
            }
        } else {
            None
        };

        Ok(BulkReport {
            result: Some(result),
            notices,
            refreshed,
        })
    }
}

/// Wire request for `target`. A filter target carries the normalized
/// search term so the server re-resolves matches at execution time.
pub fn request_for(target: &BulkTarget) -> BulkRequest {
    match target {
        BulkTarget::Ids(ids) => BulkRequest::ids(ids.iter().cloned()),
        BulkTarget::AllMatching(filter) => {
            let term = normalize_search_term(&filter.q);
            BulkRequest::all_matching(term.q, term.q_raw, filter.filters.clone())
        }
    }
}
