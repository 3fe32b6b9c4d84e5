//! Test doubles shared by the session test suites.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use shelf_remote::{
    Document, DocumentStore, InMemoryDocumentStore, InsertReceipt, RemoteError, RemoteResult,
};
use shelf_types::DocId;

/// An in-memory store that fails deletions of selected ids, for driving the
/// cascade saga into partial completion.
pub(crate) struct FlakyStore {
    inner: InMemoryDocumentStore,
    fail_deletes: Mutex<HashSet<DocId>>,
}

impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: InMemoryDocumentStore::new(),
            fail_deletes: Mutex::new(HashSet::new()),
        }
    }

    /// Make every future deletion of `id` fail.
    pub(crate) fn fail_delete(&self, id: &DocId) {
        self.fail_deletes
            .lock()
            .expect("lock poisoned")
            .insert(id.clone());
    }

    pub(crate) fn len(&self, collection: &str) -> usize {
        self.inner.len(collection)
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn insert(&self, collection: &str, fields: Value) -> RemoteResult<InsertReceipt> {
        self.inner.insert(collection, fields).await
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &DocId,
        partial: Value,
    ) -> RemoteResult<()> {
        self.inner.update_by_id(collection, id, partial).await
    }

    async fn delete_by_id(&self, collection: &str, id: &DocId) -> RemoteResult<bool> {
        if self
            .fail_deletes
            .lock()
            .expect("lock poisoned")
            .contains(id)
        {
            return Err(RemoteError::Unavailable(
                "injected delete failure".to_string(),
            ));
        }
        self.inner.delete_by_id(collection, id).await
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<Document>> {
        self.inner.query_equals(collection, field, value).await
    }

    async fn query_all_ordered_by(
        &self,
        collection: &str,
        field: &str,
    ) -> RemoteResult<Vec<Document>> {
        self.inner.query_all_ordered_by(collection, field).await
    }
}
