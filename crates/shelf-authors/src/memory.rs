use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::client::AuthorClient;
use crate::error::ContentResult;
use crate::query::AuthorQuery;
use crate::types::Author;

/// In-memory author catalog for tests and the CLI authors page.
///
/// Records live in a `Vec` behind a `RwLock` and are cloned on fetch.
#[derive(Debug, Default)]
pub struct InMemoryAuthorCatalog {
    authors: RwLock<Vec<Author>>,
}

impl InMemoryAuthorCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with the given records.
    pub fn with_authors(authors: Vec<Author>) -> Self {
        Self {
            authors: RwLock::new(authors),
        }
    }

    /// Add a record to the catalog.
    pub fn push(&self, author: Author) {
        self.authors.write().expect("lock poisoned").push(author);
    }

    pub fn len(&self) -> usize {
        self.authors.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuthorClient for InMemoryAuthorCatalog {
    async fn fetch(&self, query: &AuthorQuery) -> ContentResult<Vec<Author>> {
        debug!(query = %query, "author fetch");
        // Only the author document type lives in this catalog; any other
        // type filter matches nothing.
        if query.doc_type() != "author" {
            return Ok(Vec::new());
        }
        Ok(self.authors.read().expect("lock poisoned").clone())
    }
}
