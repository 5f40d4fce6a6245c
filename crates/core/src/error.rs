use crate::types::DbId;

/// Boxed error used to carry the underlying storage failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A required field is absent or empty.
    #[error("Missing param: {0}")]
    MissingParam(String),

    /// A field is present but malformed, or refers to something that does not exist.
    #[error("Invalid param: {0}")]
    InvalidParam(String),

    #[error("Email already in use: {0}")]
    EmailInUse(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A persistence call failed. The original error is kept as the source.
    #[error("Storage error while trying to {operation}")]
    Storage {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a persistence failure, keeping it as the error source.
    pub fn storage(operation: &'static str, source: impl Into<BoxError>) -> Self {
        CoreError::Storage {
            operation,
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}
