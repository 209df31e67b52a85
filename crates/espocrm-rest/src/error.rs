//! Error types for REST API operations

use crate::transport::TransportError;
use espocrm_auth::AuthError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The server answered with a status other than 200
    #[error("Request failed with status {code}: {message}")]
    Request {
        /// HTTP status code
        code: u16,
        /// Status message reported by the transport
        message: String,
    },

    /// Network or I/O failure below the HTTP layer
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authorization could not be prepared (e.g. HMAC key rejected)
    #[error("Authorization error: {0}")]
    Auth(#[from] AuthError),

    /// Payload could not be serialized to JSON
    #[error("Failed to encode payload: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Query parameters could not be serialized
    #[error("Failed to encode query parameters: {0}")]
    Params(#[from] serde_urlencoded::ser::Error),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

impl RestError {
    /// HTTP status code, for [`RestError::Request`]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if the server rejected the request (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    /// Check if the server failed to handle the request (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }

    /// Check if the requested record or action does not exist
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Check if the credentials were rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401) | Some(403))
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        let err = RestError::Request {
            code: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 404: Not Found");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_status_classification() {
        let err = RestError::Request {
            code: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());

        let err = RestError::Request {
            code: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(err.is_server_error());
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_non_request_errors_have_no_status() {
        let err = RestError::EnvVarNotSet("ESPOCRM_URL".to_string());
        assert_eq!(err.status_code(), None);
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("ESPOCRM_URL"));
    }
}
