use async_trait::async_trait;
use serde_json::Value;

use shelf_types::DocId;

use crate::document::{Document, InsertReceipt};
use crate::error::RemoteResult;

/// Collection-oriented document store.
///
/// All implementations must satisfy these invariants:
/// - Ids and creation timestamps are assigned by the store, never by the
///   caller. `insert` stamps the reserved `createdAt` field and returns
///   both in the receipt.
/// - `update_by_id` merges the given partial fields into the document and
///   is a tolerant no-op when the id is absent.
/// - Query results preserve a stable order: insertion order for equality
///   queries, ascending field order for `query_all_ordered_by`.
/// - Every call runs to completion or failure once issued; there is no
///   cancellation and no background continuation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its assigned id and creation
    /// timestamp.
    ///
    /// `fields` must be a JSON object; the store adds `createdAt` itself.
    async fn insert(&self, collection: &str, fields: Value) -> RemoteResult<InsertReceipt>;

    /// Merge `partial` into the document with the given id.
    ///
    /// No-op if the document does not exist.
    async fn update_by_id(&self, collection: &str, id: &DocId, partial: Value)
        -> RemoteResult<()>;

    /// Delete a document by id. Returns `true` if the document existed.
    async fn delete_by_id(&self, collection: &str, id: &DocId) -> RemoteResult<bool>;

    /// All documents whose `field` equals `value`, in insertion order.
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<Document>>;

    /// All documents in the collection, ascending by the named field.
    ///
    /// Documents missing the field sort first; numbers sort before strings.
    async fn query_all_ordered_by(&self, collection: &str, field: &str)
        -> RemoteResult<Vec<Document>>;
}
