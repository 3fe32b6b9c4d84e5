//! The [`LibrarySession`] facade: one object owning the genre store, the
//! book store, and the view coordinator, wired together the way a front end
//! needs them.

use tracing::info;

use shelf_remote::DocumentStore;
use shelf_types::{Book, DocId, Genre};

use crate::books::BookStore;
use crate::error::{SessionError, SessionResult};
use crate::genres::GenreStore;
use crate::view::ViewCoordinator;

/// Seam for the destructive-action confirmation the surrounding UI provides.
///
/// Front ends prompt the user; tests inject a fixed policy.
pub trait ConfirmDelete: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation policy that approves everything.
pub struct AlwaysConfirm;

impl ConfirmDelete for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Confirmation policy that declines everything.
pub struct NeverConfirm;

impl ConfirmDelete for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// How a confirmation-gated removal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The record (and, for genres, its books) was deleted.
    Removed,
    /// The user declined the prompt; nothing was touched.
    Declined,
    /// The target was not in the local lists; nothing was touched.
    NotFound,
}

/// A single user's library session: created at session start, discarded at
/// session end. All remote operations suspend the caller until the store
/// answers; nothing runs in the background.
pub struct LibrarySession<S, C> {
    remote: S,
    confirmer: C,
    genres: GenreStore,
    books: BookStore,
    view: ViewCoordinator,
}

impl<S: DocumentStore, C: ConfirmDelete> LibrarySession<S, C> {
    /// Open a session: fetch the genre list and the initial all-genres book
    /// view.
    pub async fn open(remote: S, confirmer: C) -> SessionResult<Self> {
        let mut session = Self {
            remote,
            confirmer,
            genres: GenreStore::new(),
            books: BookStore::new(),
            view: ViewCoordinator::new(),
        };
        session.genres.refresh(&session.remote).await?;
        let scope = session.view.scope();
        session.books.fetch_for_scope(&session.remote, &scope).await?;
        info!(genres = session.genres.len(), "session opened");
        Ok(session)
    }

    // ---- Genre operations ----

    pub async fn add_genre(&mut self, name: &str) -> SessionResult<Option<Genre>> {
        self.genres.add(&self.remote, name).await
    }

    pub async fn rename_genre(&mut self, id: &DocId, new_name: &str) -> SessionResult<bool> {
        self.genres.rename(&self.remote, id, new_name).await
    }

    /// Remove a genre and all of its books.
    ///
    /// The prompt goes through the [`ConfirmDelete`] seam first. On
    /// confirmation the genre's books are deleted remotely one by one; if
    /// any of those deletions fail the genre itself is left in place and
    /// the call fails with [`SessionError::PartialFailure`] carrying the
    /// per-book report. Only after a complete cascade is the genre record
    /// deleted and the selection reset if it pointed at the removed genre.
    pub async fn remove_genre(&mut self, id: &DocId) -> SessionResult<RemovalOutcome> {
        let Some(genre) = self.genres.get(id) else {
            return Ok(RemovalOutcome::NotFound);
        };
        let prompt = format!(
            "Are you sure you want to delete the genre \"{}\" and all its books?",
            genre.name
        );
        if !self.confirmer.confirm(&prompt) {
            return Ok(RemovalOutcome::Declined);
        }

        // Books first, then the shelf: the genre record must outlive its
        // books so an interrupted cascade can be retried.
        let scope = self.view.scope();
        let report = self
            .books
            .cascade_remove_genre(&self.remote, id, &scope)
            .await?;
        if !report.is_complete() {
            return Err(SessionError::PartialFailure(report));
        }

        self.genres.remove(&self.remote, id).await?;
        if self.view.note_genre_removed(id) {
            let scope = self.view.scope();
            self.books.fetch_for_scope(&self.remote, &scope).await?;
        }
        Ok(RemovalOutcome::Removed)
    }

    // ---- Book operations ----

    pub async fn add_book(&mut self, title: &str) -> SessionResult<Option<Book>> {
        let mode = self.view.mode().clone();
        let scope = self.view.scope();
        self.books.add(&self.remote, title, &mode, &scope).await
    }

    pub async fn rename_book(&mut self, id: &DocId, new_title: &str) -> SessionResult<bool> {
        let scope = self.view.scope();
        self.books.rename(&self.remote, id, new_title, &scope).await
    }

    pub async fn remove_book(&mut self, id: &DocId) -> SessionResult<RemovalOutcome> {
        let Some(title) = self
            .books
            .global()
            .iter()
            .chain(self.books.scoped().iter())
            .find(|b| &b.id == id)
            .map(|b| b.title.clone())
        else {
            return Ok(RemovalOutcome::NotFound);
        };
        let prompt = format!("Are you sure you want to delete the book \"{title}\"?");
        if !self.confirmer.confirm(&prompt) {
            return Ok(RemovalOutcome::Declined);
        }

        let scope = self.view.scope();
        self.books.remove(&self.remote, id, &scope).await?;
        Ok(RemovalOutcome::Removed)
    }

    // ---- View transitions ----

    pub async fn select_genre(&mut self, id: DocId) -> SessionResult<()> {
        let scope = self.view.select_genre(id);
        self.books.fetch_for_scope(&self.remote, &scope).await
    }

    pub async fn select_all_genres(&mut self) -> SessionResult<()> {
        let scope = self.view.select_all();
        self.books.fetch_for_scope(&self.remote, &scope).await
    }

    pub async fn toggle_search_all(&mut self) -> SessionResult<()> {
        let scope = self.view.toggle_search_all();
        self.books.fetch_for_scope(&self.remote, &scope).await
    }

    /// Set the search query over the authoritative book list.
    pub fn search(&mut self, query: &str) {
        let scope = self.view.scope();
        self.books.set_query(query, &scope);
    }

    // ---- Read-only snapshots ----

    pub fn genres(&self) -> &[Genre] {
        self.genres.genres()
    }

    /// The books the UI shows: the authoritative list under the active
    /// query.
    pub fn visible_books(&self) -> &[Book] {
        self.books.visible()
    }

    pub fn view(&self) -> &ViewCoordinator {
        &self.view
    }

    pub fn books(&self) -> &BookStore {
        &self.books
    }

    pub fn remote(&self) -> &S {
        &self.remote
    }

    /// Close the session, handing the remote store back to the caller.
    pub fn into_remote(self) -> S {
        self.remote
    }

    /// Find a genre by exact, case-insensitive name.
    pub fn genre_named(&self, name: &str) -> Option<&Genre> {
        self.genres
            .genres()
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }
}
