use thiserror::Error;

/// Errors from remote document-store operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// A document or field object could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store refused or failed the call (network, quota, outage).
    ///
    /// The reference backend does not distinguish causes, so neither does
    /// this variant.
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    /// I/O error from the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;
