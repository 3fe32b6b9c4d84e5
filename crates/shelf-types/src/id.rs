use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque identifier for a document in the remote store.
///
/// Identifiers are assigned by the store on insert and are never interpreted
/// by the session layer: any non-empty string is a valid id. The in-memory
/// backend hands out UUID v7 text, but nothing in Shelfline relies on that.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Parse an id from a string, rejecting empty or whitespace-only input.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.trim().is_empty() {
            return Err(TypeError::EmptyDocId);
        }
        Ok(Self(s.to_string()))
    }

    /// Wrap a store-assigned id without validation.
    ///
    /// For ids that come back from the store, which are trusted to be
    /// well-formed. Use [`DocId::parse`] for user-supplied input.
    pub fn from_store(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short identifier for display (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Debug for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocId({})", self.0)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
