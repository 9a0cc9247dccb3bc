//! Seams to the server: where bulk mutations go and where pages come from.

use std::future::Future;

use invdesk_model::{BulkRequest, BulkResponse, FilterSnapshot, Page};

use crate::error::Result;

/// Server route that performs bulk mutations.
pub trait MutationEndpoint {
    /// Send a bulk delete. A non-success status or unreachable server is an
    /// error; any success body decodes, possibly to an empty response.
    fn delete(&self, request: &BulkRequest) -> impl Future<Output = Result<BulkResponse>> + Send;

    /// How many records currently match `filter`.
    fn count_matching(&self, filter: &FilterSnapshot) -> impl Future<Output = Result<u64>> + Send;
}

/// Source of paginated listings.
pub trait PagingCollaborator {
    /// Fetch 1-based page `page` of the listing under `filter`.
    fn fetch_page(
        &self,
        page: u32,
        filter: &FilterSnapshot,
    ) -> impl Future<Output = Result<Page>> + Send;
}
