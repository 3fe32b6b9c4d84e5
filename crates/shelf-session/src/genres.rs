//! The canonical genre list and its remote-backed mutations.

use serde_json::json;
use tracing::debug;

use shelf_remote::{collections, Document, DocumentStore};
use shelf_types::{DocId, Genre};

use crate::error::{SessionError, SessionResult};

/// Hard cap on the canonical genre list.
pub const MAX_GENRES: usize = 5;

/// Owns the in-memory ordered list of genres and mediates every mutation
/// against the remote store.
///
/// The list is ordered by creation time ascending, mirroring the remote
/// ordering, and never exceeds [`MAX_GENRES`] entries. Mutations go remote
/// first: a failed call leaves the local list exactly as it was.
#[derive(Debug, Default)]
pub struct GenreStore {
    genres: Vec<Genre>,
}

impl GenreStore {
    pub fn new() -> Self {
        Self { genres: Vec::new() }
    }

    /// Read-only snapshot of the canonical list.
    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    /// Look up a genre by id.
    pub fn get(&self, id: &DocId) -> Option<&Genre> {
        self.genres.iter().find(|g| &g.id == id)
    }

    /// Refetch the canonical list, ordered by creation time.
    pub async fn refresh<S>(&mut self, remote: &S) -> SessionResult<()>
    where
        S: DocumentStore + ?Sized,
    {
        let docs = remote
            .query_all_ordered_by(collections::GENRES, collections::CREATED_AT)
            .await?;
        self.genres = docs
            .iter()
            .map(Document::decode)
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    /// Create a genre.
    ///
    /// Returns `Ok(None)` without touching the store when the name trims to
    /// empty. Fails with [`SessionError::CapacityExceeded`], before any
    /// remote call is issued, when the list is at [`MAX_GENRES`].
    pub async fn add<S>(&mut self, remote: &S, name: &str) -> SessionResult<Option<Genre>>
    where
        S: DocumentStore + ?Sized,
    {
        if name.trim().is_empty() {
            return Ok(None);
        }
        if self.genres.len() >= MAX_GENRES {
            return Err(SessionError::CapacityExceeded { max: MAX_GENRES });
        }

        let receipt = remote
            .insert(collections::GENRES, json!({ "name": name }))
            .await?;
        debug!(id = %receipt.id, name, "genre created");

        let genre = Genre::new(receipt.id, name, receipt.created_at);
        self.genres.push(genre.clone());
        Ok(Some(genre))
    }

    /// Rename a genre, preserving its position in the list.
    ///
    /// Unknown ids are a silent no-op (`Ok(false)`) with no remote call.
    pub async fn rename<S>(&mut self, remote: &S, id: &DocId, new_name: &str) -> SessionResult<bool>
    where
        S: DocumentStore + ?Sized,
    {
        if self.get(id).is_none() {
            return Ok(false);
        }

        remote
            .update_by_id(collections::GENRES, id, json!({ "name": new_name }))
            .await?;

        if let Some(genre) = self.genres.iter_mut().find(|g| &g.id == id) {
            genre.name = new_name.to_string();
        }
        Ok(true)
    }

    /// Delete a genre remotely and locally.
    ///
    /// Cascade of the genre's books and the confirmation prompt are
    /// orchestrated by the session facade, which deletes the books before
    /// calling this. Returns `false` if the id was not in the local list.
    pub async fn remove<S>(&mut self, remote: &S, id: &DocId) -> SessionResult<bool>
    where
        S: DocumentStore + ?Sized,
    {
        if self.get(id).is_none() {
            return Ok(false);
        }

        remote.delete_by_id(collections::GENRES, id).await?;
        self.genres.retain(|g| &g.id != id);
        debug!(id = %id, "genre removed");
        Ok(true)
    }
}
