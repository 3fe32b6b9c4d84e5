//! Read-only author content for Shelfline.
//!
//! A thin client over a headless content API. Entirely separate from the
//! library session: it shares no state with the genre/book stores and has
//! no mutation path. The API is queried, decoded, and rendered, nothing
//! more.
//!
//! Backends implement [`AuthorClient`]; [`InMemoryAuthorCatalog`] is the
//! fixture backend for tests and the CLI authors page.

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod query;
pub mod types;

pub use client::AuthorClient;
pub use config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use memory::InMemoryAuthorCatalog;
pub use query::AuthorQuery;
pub use types::{Author, ImageRef, Slug};
