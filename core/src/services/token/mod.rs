//! Token service module for stateless bearer authentication
//!
//! This module handles all token-related operations including:
//! - Time sources for issuance and expiry (injectable for tests)
//! - HMAC signing key management
//! - Compact token encoding, signature verification and decoding
//! - Issuing tokens and validating incoming bearer tokens

mod clock;
mod codec;
mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{DecodeFailure, TokenCodec};
pub use config::TokenServiceConfig;
pub use key_manager::{parse_hmac_algorithm, SigningKey, BASE64_SECRET_PREFIX};
pub use service::TokenService;
