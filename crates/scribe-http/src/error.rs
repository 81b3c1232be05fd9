//! Transport error types

use thiserror::Error;

/// Errors raised by the HTTP transport
#[derive(Error, Debug)]
pub enum HttpError {
    /// The client was closed before this call was issued
    #[error("client is closed")]
    Closed,

    /// Base URL or request path failed to parse
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-2xx response, with the raw body preserved for higher layers
    #[error("unexpected status {code}")]
    Status { code: u16, body: Vec<u8> },

    /// Request or response JSON handling failed
    #[error("JSON error: {0}")]
    Json(String),

    /// Connection, DNS, TLS, or timeout failure from reqwest
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Result type for transport operations
pub type HttpResult<T> = Result<T, HttpError>;

impl HttpError {
    /// The status code, when this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::Status { code, .. } => Some(*code),
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for connection-level failures (no response was received).
    pub fn is_connect(&self) -> bool {
        matches!(self, HttpError::Reqwest(e) if e.is_connect() || e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = HttpError::Status {
            code: 503,
            body: b"unavailable".to_vec(),
        };
        assert_eq!(err.to_string(), "unexpected status 503");
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_closed_has_no_status() {
        assert_eq!(HttpError::Closed.status_code(), None);
        assert!(!HttpError::Closed.is_connect());
    }
}
