//! Error types for authorization setup

/// Errors that can occur while preparing request authorization
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The secret key could not be loaded into the HMAC primitive
    #[error("Invalid HMAC key: {0}")]
    InvalidKey(String),
}

/// Result type for authorization operations
pub type AuthResult<T> = Result<T, AuthError>;
