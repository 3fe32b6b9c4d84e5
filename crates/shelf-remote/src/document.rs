use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shelf_types::{DocId, Timestamp};

use crate::error::{RemoteError, RemoteResult};

/// A document as returned by store queries: the assigned id plus the raw
/// field object, decoded into typed entities on demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub fields: Value,
}

impl Document {
    pub fn new(id: DocId, fields: Value) -> Self {
        Self { id, fields }
    }

    /// Decode the document into a typed entity.
    ///
    /// The envelope id is merged into the field object under `"id"` before
    /// deserializing, so entity types carry their identity as a plain field.
    pub fn decode<T: DeserializeOwned>(&self) -> RemoteResult<T> {
        let mut merged = self.fields.clone();
        match merged.as_object_mut() {
            Some(map) => {
                map.insert("id".to_string(), Value::String(self.id.as_str().to_string()));
            }
            None => {
                return Err(RemoteError::Serialization(format!(
                    "document {} has non-object fields",
                    self.id
                )))
            }
        }
        serde_json::from_value(merged).map_err(|e| RemoteError::Serialization(e.to_string()))
    }

    /// Read a single field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Receipt returned by [`DocumentStore::insert`](crate::DocumentStore::insert):
/// the assigned id and the store-side creation timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertReceipt {
    pub id: DocId,
    pub created_at: Timestamp,
}
