//! # Instagram Core
//!
//! Core authentication logic for the Instagram backend: typed token claims,
//! the signing key, the token codec and token service, and the credential
//! verification contract used by the sign-in flow.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::{
    AuthService, Clock, CredentialVerifier, DecodeFailure, InMemoryCredentialStore, ManualClock,
    SigningKey, SystemClock, TokenCodec, TokenService, TokenServiceConfig,
};
