//! Error types for the Meridian clients

use std::time::Duration;
use thiserror::Error;

use meridian_core::dto::ValidationError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Meridian clients
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Request rejected by client-side validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Token acquisition failed
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// A wait operation exceeded its overall timeout
    #[error("Timed out after {waited:?} waiting for {resource}")]
    WaitTimeout { resource: String, waited: Duration },

    /// A policy assignment reached the `failed` terminal status
    #[error("Policy assignment {id} failed: {detail}")]
    AssignmentFailed { id: String, detail: String },

    /// A resource reported a status this crate does not recognize
    #[error("Unexpected status `{status}` reported by {resource}")]
    UnexpectedStatus { resource: String, status: String },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_))
            || matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::InvalidRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(ClientError::NotFound("policy p1".to_string()).is_not_found());
        assert!(ClientError::api_error(404, "gone").is_not_found());
        assert!(!ClientError::api_error(500, "boom").is_not_found());
    }

    #[test]
    fn test_status_class_helpers() {
        assert!(ClientError::api_error(400, "bad").is_client_error());
        assert!(!ClientError::api_error(400, "bad").is_server_error());
        assert!(ClientError::api_error(503, "unavailable").is_server_error());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ClientError =
            ValidationError::new("name", "must not be empty").into();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert!(err.to_string().contains("name"));
    }
}
