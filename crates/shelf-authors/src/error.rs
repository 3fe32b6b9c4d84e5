use thiserror::Error;

/// Errors from content-API operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The query expression was rejected by the API.
    #[error("query rejected: {0}")]
    Query(String),

    /// A response payload could not be decoded into author records.
    #[error("decode error: {0}")]
    Decode(String),

    /// The content API could not be reached.
    #[error("content API unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
