use thiserror::Error;

/// Errors from foundation type construction and parsing.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A document identifier must contain at least one non-whitespace character.
    #[error("document id is empty")]
    EmptyDocId,

    /// A required entity field was absent or had the wrong shape.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}
