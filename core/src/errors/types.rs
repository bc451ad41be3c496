//! Error types for authentication and token operations

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed: {message}")]
    PasswordHashing { message: String },
}

/// Token-related errors
///
/// [`TokenService::extract_subject`](crate::services::token::TokenService::extract_subject)
/// only ever surfaces `InvalidArgument` and `BadSignature`; the remaining
/// variants describe issuance and startup failures or the codec's finer
/// reasons converted for internal callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("{field} cannot be null or empty")]
    InvalidArgument { field: &'static str },

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature does not match locally computed signature")]
    BadSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token signing is misconfigured: {message}")]
    ConfigurationFault { message: String },
}

impl TokenError {
    /// Creates a configuration fault with the given message
    pub fn configuration(message: impl Into<String>) -> Self {
        TokenError::ConfigurationFault {
            message: message.into(),
        }
    }
}
