use thiserror::Error;

/// Error raised by a CRUD callback.
///
/// The request handlers translate each kind into an HTTP status; anything
/// that is not a recognised domain failure belongs in `Internal`.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// The record addressed by the request does not exist
    #[error("{0}")]
    NotFound(String),

    /// A record with the same key already exists
    #[error("{0}")]
    Duplicate(String),

    /// The payload could not be turned into a valid record
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl CallbackError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        CallbackError::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        CallbackError::Duplicate(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CallbackError::Validation(msg.into())
    }

    pub fn internal(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        CallbackError::Internal(err.into())
    }
}

impl From<serde_json::Error> for CallbackError {
    fn from(err: serde_json::Error) -> Self {
        CallbackError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for CallbackError {
    fn from(err: validator::ValidationErrors) -> Self {
        CallbackError::Validation(err.to_string())
    }
}

/// Type alias for callback results
pub type CallbackResult<T> = Result<T, CallbackError>;
