use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use shelf_types::{DocId, Timestamp};

use crate::document::{Document, InsertReceipt};
use crate::error::{RemoteError, RemoteResult};
use crate::traits::DocumentStore;

/// In-memory, HashMap-based document store.
///
/// Intended for tests, the CLI shell, and embedding. Collections are created
/// lazily on first insert; documents are held in insertion order behind a
/// `RwLock` and cloned on read. Ids are UUID v7 text. The server clock is
/// millisecond wall time with a monotonic tie-breaker, so two inserts in the
/// same millisecond still order by insertion.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDoc>>>,
    clock_ms: AtomicU64,
}

#[derive(Clone, Debug)]
struct StoredDoc {
    id: DocId,
    fields: Value,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            clock_ms: AtomicU64::new(0),
        }
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .expect("lock poisoned")
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Returns `true` if the collection holds no documents.
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Next server timestamp: wall time, bumped past the previous stamp so
    /// the clock never repeats or runs backwards within one store.
    fn next_timestamp(&self) -> Timestamp {
        let now = Timestamp::now().as_millis();
        let mut prev = self.clock_ms.load(AtomicOrdering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.clock_ms.compare_exchange_weak(
                prev,
                next,
                AtomicOrdering::Relaxed,
                AtomicOrdering::Relaxed,
            ) {
                Ok(_) => return Timestamp::from_millis(next),
                Err(observed) => prev = observed,
            }
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, fields: Value) -> RemoteResult<InsertReceipt> {
        let mut fields = fields;
        let map = fields.as_object_mut().ok_or_else(|| {
            RemoteError::Serialization("insert fields must be a JSON object".to_string())
        })?;

        let created_at = self.next_timestamp();
        map.insert(
            crate::collections::CREATED_AT.to_string(),
            Value::from(created_at.as_millis()),
        );

        let id = DocId::from_store(Uuid::now_v7().to_string());
        debug!(collection, id = %id, "insert document");

        let mut collections = self.collections.write().expect("lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDoc {
                id: id.clone(),
                fields,
            });

        Ok(InsertReceipt { id, created_at })
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &DocId,
        partial: Value,
    ) -> RemoteResult<()> {
        let partial = partial.as_object().cloned().ok_or_else(|| {
            RemoteError::Serialization("update fields must be a JSON object".to_string())
        })?;

        let mut collections = self.collections.write().expect("lock poisoned");
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(());
        };
        // Tolerant no-op when the id is absent.
        if let Some(doc) = docs.iter_mut().find(|d| &d.id == id) {
            debug!(collection, id = %id, "update document");
            if let Some(map) = doc.fields.as_object_mut() {
                for (key, value) in partial {
                    map.insert(key, value);
                }
            }
        }
        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &DocId) -> RemoteResult<bool> {
        let mut collections = self.collections.write().expect("lock poisoned");
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| &d.id != id);
        let existed = docs.len() < before;
        if existed {
            debug!(collection, id = %id, "delete document");
        }
        Ok(existed)
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> RemoteResult<Vec<Document>> {
        let collections = self.collections.read().expect("lock poisoned");
        let docs = collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(docs
            .iter()
            .filter(|d| d.fields.get(field) == Some(value))
            .map(|d| Document::new(d.id.clone(), d.fields.clone()))
            .collect())
    }

    async fn query_all_ordered_by(
        &self,
        collection: &str,
        field: &str,
    ) -> RemoteResult<Vec<Document>> {
        let collections = self.collections.read().expect("lock poisoned");
        let docs = collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let mut result: Vec<Document> = docs
            .iter()
            .map(|d| Document::new(d.id.clone(), d.fields.clone()))
            .collect();
        // Stable sort: documents tied on the field keep insertion order.
        result.sort_by(|a, b| compare_field_values(a.field(field), b.field(field)));
        Ok(result)
    }
}

/// Ascending order over optional JSON field values: missing first, then
/// numbers, then strings, then everything else (by serialized form).
fn compare_field_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Number(_)) => 1,
            Some(Value::String(_)) => 2,
            Some(_) => 3,
        }
    }

    match rank(a).cmp(&rank(b)) {
        Ordering::Equal => match (a, b) {
            (Some(Value::Number(x)), Some(Value::Number(y))) => {
                let x = x.as_f64().unwrap_or(0.0);
                let y = y.as_f64().unwrap_or(0.0);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
            _ => Ordering::Equal,
        },
        other => other,
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let collections = self.collections.read().expect("lock poisoned");
        let counts: HashMap<&str, usize> = collections
            .iter()
            .map(|(name, docs)| (name.as_str(), docs.len()))
            .collect();
        f.debug_struct("InMemoryDocumentStore")
            .field("collections", &counts)
            .finish()
    }
}
