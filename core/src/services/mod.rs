//! Business services containing the authentication logic.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, CredentialVerifier, InMemoryCredentialStore};
pub use token::{
    Clock, DecodeFailure, ManualClock, SigningKey, SystemClock, TokenCodec, TokenService,
    TokenServiceConfig,
};
