//! Collection and field names shared between the session layer and backends.

/// Collection of genre documents (`{name, createdAt}`).
pub const GENRES: &str = "genres";

/// Collection of book documents (`{title, shelfId, createdAt}`).
pub const BOOKS: &str = "books";

/// Reserved field stamped by the store on every insert.
pub const CREATED_AT: &str = "createdAt";

/// Foreign-key field on book documents referencing a genre id.
pub const SHELF_ID: &str = "shelfId";
