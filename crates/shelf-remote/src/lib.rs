//! Remote document storage for Shelfline.
//!
//! This crate defines the seam between the session layer and the hosted
//! document database: a small collection-oriented CRUD-and-query contract,
//! [`DocumentStore`]. Documents are schemaless JSON field objects under a
//! store-assigned id; the store stamps every inserted document with its own
//! creation timestamp and hands both back in an [`InsertReceipt`].
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentStore`] trait:
//!
//! - [`InMemoryDocumentStore`] — `HashMap`-based store for tests, the CLI
//!   shell, and embedding
//!
//! # Design Rules
//!
//! 1. The store assigns ids and creation timestamps; clients never do.
//! 2. `update_by_id` is a tolerant no-op when the id is absent.
//! 3. Queries return decoded-on-demand [`Document`] envelopes, never
//!    interpreted by the store itself.
//! 4. All failures are propagated, never silently ignored.

pub mod collections;
pub mod document;
pub mod error;
pub mod memory;
pub mod traits;

pub use document::{Document, InsertReceipt};
pub use error::{RemoteError, RemoteResult};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
