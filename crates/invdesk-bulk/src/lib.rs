//! Bulk delete coordination for paginated list views.
//!
//! [`BulkOperationCoordinator`] turns a [`SelectionStore`](invdesk_selection::SelectionStore)
//! into a delete request against a [`MutationEndpoint`], classifies the
//! response and hands it to the [`ReconciliationPolicy`], which updates the
//! selection and decides whether the current page must be re-fetched from
//! the [`PagingCollaborator`].
//!
//! # Response classification
//!
//! | Response                            | Outcome                              |
//! |-------------------------------------|--------------------------------------|
//! | `removed_ids` present               | exactly those ids are gone           |
//! | `removed` equals the request size   | every requested id is gone           |
//! | `removed` on a filter delete        | count is the outcome                 |
//! | anything else                       | ambiguous: clear selection, refresh  |
//! | `status: "error"` / `"fail"`        | [`BulkError::Rejected`]              |
//!
//! [`HttpEndpoint`] implements both traits over `reqwest`.

pub mod classify;
pub mod config;
pub mod coordinator;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod reconcile;
pub mod trigger;

pub use classify::classify;
pub use config::{ClientConfig, DEFAULT_CSRF_HEADER, DEFAULT_TIMEOUT_SECS, ViewEndpoints};
pub use coordinator::{BulkOperationCoordinator, BulkReport, request_for};
pub use endpoint::{MutationEndpoint, PagingCollaborator};
pub use error::{BulkError, Result};
pub use http::{HttpEndpoint, decode_delete_response, extract_record_ids};
pub use reconcile::{Reconciliation, ReconciliationPolicy, refresh_page};
pub use trigger::{BulkTrigger, TriggerGuard};
