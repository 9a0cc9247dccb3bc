//! Bulk mutation contracts shared by the selection store and the coordinator.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{FilterSnapshot, RecordId};

/// What a bulk operation was asked to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkTarget {
    /// An explicit enumeration of record ids.
    Ids(BTreeSet<RecordId>),
    /// Every record matching the filter, resolved by the server at execution time.
    AllMatching(FilterSnapshot),
}

impl BulkTarget {
    /// Number of records requested, when known client-side.
    pub fn requested_count(&self) -> Option<usize> {
        match self {
            Self::Ids(ids) => Some(ids.len()),
            Self::AllMatching(_) => None,
        }
    }

    pub fn is_all_matching(&self) -> bool {
        matches!(self, Self::AllMatching(_))
    }
}

/// JSON body of a bulk delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BulkRequest {
    Ids {
        ids: Vec<RecordId>,
    },
    AllMatching {
        all_matching: bool,
        q: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        q_raw: Option<String>,
        filters: BTreeMap<String, String>,
    },
}

impl BulkRequest {
    pub fn ids(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self::Ids {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn all_matching(
        q: impl Into<String>,
        q_raw: Option<String>,
        filters: BTreeMap<String, String>,
    ) -> Self {
        Self::AllMatching {
            all_matching: true,
            q: q.into(),
            q_raw,
            filters,
        }
    }
}

/// Server-reported status envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
    Fail,
    #[serde(other)]
    Other,
}

impl ResponseStatus {
    pub fn is_rejection(self) -> bool {
        matches!(self, Self::Error | Self::Fail)
    }
}

/// JSON body of a bulk delete response. Every field is optional: an empty
/// body (or `204 No Content`) decodes to the default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default, alias = "removedIds")]
    pub removed_ids: Option<Vec<RecordId>>,
    #[serde(default)]
    pub removed: Option<u64>,
}

/// Classified outcome of one bulk operation.
///
/// Transient: built from a [`BulkResponse`] and consumed by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOperationResult {
    pub requested: BulkTarget,
    /// Ids known to be gone, when the outcome identifies them.
    pub removed_ids: Option<BTreeSet<RecordId>>,
    /// Number of records the server reported removing.
    pub removed_count: Option<u64>,
    /// Neither an id list nor a count matching the request was returned.
    pub ambiguous: bool,
}

impl BulkOperationResult {
    /// Requested ids that the server did not confirm as removed.
    ///
    /// Empty when the outcome is ambiguous or the target was a filter.
    pub fn unconfirmed_ids(&self) -> BTreeSet<RecordId> {
        match (&self.requested, &self.removed_ids) {
            (BulkTarget::Ids(requested), Some(removed)) => {
                requested.difference(removed).cloned().collect()
            }
            _ => BTreeSet::new(),
        }
    }

    /// True when every requested id was confirmed removed.
    pub fn is_complete(&self) -> bool {
        !self.ambiguous && self.unconfirmed_ids().is_empty()
    }
}

/// One page of a paginated listing. Only record identity is known here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    pub ids: Vec<RecordId>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
