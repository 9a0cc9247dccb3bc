//! Shared types for the invdesk workspace.
//!
//! Everything here is plain data: record identifiers, the filter snapshot a
//! list view is showing, the bulk-delete wire contracts and the transient
//! [`BulkOperationResult`] used to drive reconciliation.

pub mod bulk;
pub mod error;
pub mod filter;
pub mod ids;
pub mod notice;

pub use bulk::{
    BulkOperationResult, BulkRequest, BulkResponse, BulkTarget, Page, ResponseStatus,
};
pub use error::{ModelError, Result};
pub use filter::FilterSnapshot;
pub use ids::{ListViewKey, RecordId};
pub use notice::{Notice, NoticeLevel};
