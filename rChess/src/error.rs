//! Error types.

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for rChess operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Failed to parse response data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation requires a stored credential but none was present.
    #[error("Authentication required")]
    AuthRequired,

    /// A required field was missing in the response.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Invalid argument passed to an API method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key-value storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// No route record matches the requested path.
    #[error("No route matches '{0}'")]
    RouteNotFound(String),

    /// Guards kept redirecting without settling on a location.
    #[error("Redirect loop while navigating to '{0}'")]
    RedirectLoop(String),

    /// No view was registered for a route.
    #[error("No view registered for {0}")]
    ViewMissing(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a status error.
    pub fn status_error(status: StatusCode, message: impl Into<String>) -> Self {
        Error::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Error::MissingField(field.into())
    }

    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// HTTP status carried by this error, if the server produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::AuthRequired => true,
            _ => self.status() == Some(StatusCode::UNAUTHORIZED),
        }
    }
}

/// Result type alias for rChess operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::status_error(StatusCode::BAD_REQUEST, "invalid move");
        assert_eq!(format!("{}", e), "HTTP 400 Bad Request: invalid move");
    }

    #[test]
    fn test_auth_error() {
        assert!(Error::status_error(StatusCode::UNAUTHORIZED, "Token is missing!").is_auth_error());
        assert!(Error::AuthRequired.is_auth_error());
        assert!(!Error::status_error(StatusCode::NOT_FOUND, "gone").is_auth_error());
        assert!(!Error::parse("bad").is_auth_error());
    }

    #[test]
    fn test_status() {
        let e = Error::status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(e.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(Error::RouteNotFound("/x".into()).status(), None);
    }
}
