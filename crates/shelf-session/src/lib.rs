//! Library session core for Shelfline.
//!
//! Keeps the in-memory genre and book lists consistent with the remote
//! document store across create, edit, delete, and filter operations. The
//! interesting invariants live here:
//!
//! - the canonical genre list never exceeds [`genres::MAX_GENRES`] entries;
//! - every mutation goes remote-first, so a failed call leaves local state
//!   untouched;
//! - deleting a genre cascades to its books as a saga of independent
//!   per-book deletions, reported in a [`CascadeReport`];
//! - the book view is either scoped to one genre or global, an explicit
//!   [`ViewMode`] rather than a scattered flag check;
//! - the filtered list is a pure projection, recomputed through
//!   [`filter_books`] after every mutation and never patched by hand.
//!
//! [`LibrarySession`] ties the pieces together behind one facade; the
//! individual stores remain usable on their own.

pub mod books;
pub mod error;
pub mod filter;
pub mod genres;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use books::{BookStore, CascadeReport};
pub use error::{SessionError, SessionResult};
pub use filter::filter_books;
pub use genres::{GenreStore, MAX_GENRES};
pub use session::{AlwaysConfirm, ConfirmDelete, LibrarySession, NeverConfirm, RemovalOutcome};
pub use view::{FetchScope, ViewCoordinator, ViewMode};
