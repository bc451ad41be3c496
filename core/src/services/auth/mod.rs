//! Authentication service module
//!
//! This module connects credential verification to token issuance:
//! - The credential verification contract
//! - An in-memory, bcrypt-backed credential store for development and tests
//! - The sign-in flow that issues a bearer token for a verified principal

mod memory_store;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use memory_store::InMemoryCredentialStore;
pub use service::AuthService;
pub use traits::CredentialVerifier;
