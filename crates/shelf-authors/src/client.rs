use async_trait::async_trait;

use crate::error::ContentResult;
use crate::query::AuthorQuery;
use crate::types::Author;

/// Read-only transport to the content API.
///
/// There is deliberately no mutation path: author content is managed in the
/// content studio, not by this application.
#[async_trait]
pub trait AuthorClient: Send + Sync {
    /// Run a query and decode the matching author records.
    async fn fetch(&self, query: &AuthorQuery) -> ContentResult<Vec<Author>>;
}
