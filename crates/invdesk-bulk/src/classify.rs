//! Turning a bulk-delete response into a [`BulkOperationResult`].

use std::collections::BTreeSet;

use invdesk_model::{BulkOperationResult, BulkResponse, BulkTarget, RecordId, ResponseStatus};

use crate::error::{BulkError, Result};

/// Classify `response` to a request for `requested`.
///
/// Checked in order:
///
/// 1. an explicit removed-id list identifies exactly what is gone;
/// 2. a count equal to the requested size confirms every requested id;
/// 3. anything else (a different count, or nothing) is ambiguous.
///
/// For an all-matching target the request size is unknown client-side, so
/// a count is taken as the outcome and is not ambiguous. A server
/// rejection (`status: "error"`/`"fail"`) is an error.
pub fn classify(requested: BulkTarget, response: &BulkResponse) -> Result<BulkOperationResult> {
    if response.status.is_some_and(ResponseStatus::is_rejection) {
        return Err(BulkError::Rejected {
            msg: response
                .msg
                .clone()
                .unwrap_or_else(|| "the server reported an error".to_string()),
        });
    }

    if let Some(removed) = &response.removed_ids {
        let removed_ids: BTreeSet<RecordId> = removed.iter().cloned().collect();
        tracing::debug!(removed = removed_ids.len(), "response lists removed ids");
        return Ok(BulkOperationResult {
            removed_count: Some(removed_ids.len() as u64),
            removed_ids: Some(removed_ids),
            requested,
            ambiguous: false,
        });
    }

    let count = response.removed;
    let confirmed = match (&requested, count) {
        (BulkTarget::Ids(ids), Some(n)) if n == ids.len() as u64 => Some(ids.clone()),
        _ => None,
    };
    if let Some(ids) = confirmed {
        tracing::debug!(?count, "removed count matches request");
        return Ok(BulkOperationResult {
            requested,
            removed_ids: Some(ids),
            removed_count: count,
            ambiguous: false,
        });
    }

    if requested.is_all_matching() && count.is_some() {
        tracing::debug!(?count, "filter delete reported a count");
        return Ok(BulkOperationResult {
            requested,
            removed_ids: None,
            removed_count: count,
            ambiguous: false,
        });
    }

    tracing::debug!(?count, "response does not identify removed records");
    Ok(BulkOperationResult {
        requested,
        removed_ids: None,
        removed_count: count,
        ambiguous: true,
    })
}
