//! Error types for moviedex

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification surfaced to callers.
///
/// `Network` means "try again", `Api` means the server refused the request
/// (quota, bad key, bad parameters), `Decoding` means the payload did not
/// have the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Api,
    Decoding,
    Storage,
    Config,
}

/// Unified error type for moviedex operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response arrived (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered 429; the API key's quota is exhausted
    #[error("API rate limit exceeded (HTTP 429), the API key needs to be replaced or topped up")]
    RateLimited,

    /// Any other non-success status code
    #[error("HTTP error: {0}")]
    HttpStatus(StatusCode),

    /// Payload received but did not match the expected schema
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Poster bytes could not be decoded or re-encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Local list store failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(_) => ErrorKind::Network,
            Error::RateLimited | Error::HttpStatus(_) => ErrorKind::Api,
            Error::Decoding(_) | Error::Image(_) => ErrorKind::Decoding,
            Error::Io(_) | Error::Database(_) => ErrorKind::Storage,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decoding(err.to_string())
    }
}

/// Result alias for moviedex operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_api_kind() {
        assert_eq!(Error::RateLimited.kind(), ErrorKind::Api);
        assert!(Error::RateLimited.is_rate_limited());
    }

    #[test]
    fn test_http_status_is_api_kind_but_not_rate_limit() {
        let err = Error::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_serde_error_becomes_decoding() {
        let err: Error = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn test_storage_errors_are_storage_kind() {
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(io.kind(), ErrorKind::Storage);
        let db = Error::Database(rusqlite::Error::InvalidQuery);
        assert_eq!(db.kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::HttpStatus(StatusCode::NOT_FOUND).to_string(),
            "HTTP error: 404 Not Found"
        );
        assert_eq!(
            Error::Decoding("missing field `d`".to_string()).to_string(),
            "Decoding error: missing field `d`"
        );
    }
}
