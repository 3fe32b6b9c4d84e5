//! View-state machine: which book list is authoritative right now.
//!
//! The decision is computed once per transition into an explicit
//! [`FetchScope`] that the book store and filter consume uniformly, instead
//! of every consumer re-deriving it from the selection and the search-all
//! toggle.

use serde::{Deserialize, Serialize};

use shelf_types::DocId;

/// What the user is browsing: one genre, or the whole library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Browsing across all genres.
    AllGenres,
    /// Browsing a single selected genre.
    PerGenre(DocId),
}

impl ViewMode {
    /// The selected genre id, if one is selected.
    pub fn selected_genre(&self) -> Option<&DocId> {
        match self {
            ViewMode::AllGenres => None,
            ViewMode::PerGenre(id) => Some(id),
        }
    }
}

/// Which list a book fetch populates: the global list or one genre's list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchScope {
    Global,
    Genre(DocId),
}

/// Holds the selection and the "search across all genres" toggle, and
/// derives the effective fetch scope from them.
///
/// Transitions return the new scope so the caller can refetch; any
/// transition invalidates the current filtered list (the refetch resets it).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewCoordinator {
    mode: ViewMode,
    search_all_genres: bool,
}

impl ViewCoordinator {
    /// Start browsing all genres with the search toggle off.
    pub fn new() -> Self {
        Self {
            mode: ViewMode::AllGenres,
            search_all_genres: false,
        }
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn search_all_genres(&self) -> bool {
        self.search_all_genres
    }

    /// The authoritative scope: global when browsing all genres or when the
    /// search-all toggle is on, otherwise the selected genre.
    pub fn scope(&self) -> FetchScope {
        match (&self.mode, self.search_all_genres) {
            (ViewMode::AllGenres, _) | (_, true) => FetchScope::Global,
            (ViewMode::PerGenre(id), false) => FetchScope::Genre(id.clone()),
        }
    }

    /// Select a single genre.
    pub fn select_genre(&mut self, id: DocId) -> FetchScope {
        self.mode = ViewMode::PerGenre(id);
        self.scope()
    }

    /// Go back to browsing all genres.
    pub fn select_all(&mut self) -> FetchScope {
        self.mode = ViewMode::AllGenres;
        self.scope()
    }

    /// Flip the "search across all genres" toggle.
    pub fn toggle_search_all(&mut self) -> FetchScope {
        self.search_all_genres = !self.search_all_genres;
        self.scope()
    }

    /// A genre was removed: if it was the current selection, fall back to
    /// all-genres. Returns `true` if the selection changed.
    pub fn note_genre_removed(&mut self, id: &DocId) -> bool {
        if self.mode.selected_genre() == Some(id) {
            self.mode = ViewMode::AllGenres;
            true
        } else {
            false
        }
    }
}

impl Default for ViewCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
