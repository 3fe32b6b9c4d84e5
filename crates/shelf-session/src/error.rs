use thiserror::Error;

use shelf_remote::RemoteError;

use crate::books::CascadeReport;

/// Errors from library session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The canonical genre list is at its hard cap.
    #[error("maximum of {max} genres allowed in the library")]
    CapacityExceeded { max: usize },

    /// A book was added while no single genre was selected.
    #[error("select a genre to add a book")]
    NoGenreSelected,

    /// A cascade delete completed only partially; the report lists which
    /// per-book deletions succeeded and which failed. Nothing is rolled
    /// back, and the genre record itself is left in place.
    #[error(
        "cascade delete incomplete: {} of {} book deletions failed",
        .0.failed.len(),
        .0.attempted()
    )]
    PartialFailure(CascadeReport),

    /// The remote store failed the call; local lists are unchanged.
    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
