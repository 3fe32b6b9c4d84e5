//! Foundation types for Shelfline.
//!
//! This crate provides the identifier, temporal, and entity types used
//! throughout the Shelfline system. Every other Shelfline crate depends on
//! `shelf-types`.
//!
//! # Key Types
//!
//! - [`DocId`] — Opaque document identifier assigned by the remote store
//! - [`Timestamp`] — Millisecond-precision creation timestamp, totally ordered
//! - [`Genre`] — A named grouping of books (also called a bookshelf)
//! - [`Book`] — A titled entry belonging to exactly one genre

pub mod entity;
pub mod error;
pub mod id;
pub mod temporal;

pub use entity::{Book, Genre};
pub use error::TypeError;
pub use id::DocId;
pub use temporal::Timestamp;
