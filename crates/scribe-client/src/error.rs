//! Store error taxonomy

use scribe_http::HttpError;
use thiserror::Error;

/// Errors surfaced by store operations
///
/// Nothing here is retried or swallowed: every failure belongs to the one
/// operation that produced it, and an error on a write means "no guarantee
/// the write occurred".
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection, DNS, timeout, or any non-2xx not otherwise classified
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),

    /// The server rejected a write on semantic grounds; carries its detail
    /// text verbatim so it can be shown to the user
    #[error("validation rejected: {detail}")]
    ValidationRejected { detail: String },

    /// The requested blob does not exist
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape
    #[error("decode failure: {0}")]
    Decode(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// True for semantic rejections the caller can fix and retry
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::ValidationRejected { .. })
    }

    /// True when the target simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
