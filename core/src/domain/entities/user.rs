//! Verified principal produced by credential verification.

use serde::{Deserialize, Serialize};

/// Identity of a caller whose credentials have been verified
///
/// Only a [`CredentialVerifier`](crate::services::auth::CredentialVerifier)
/// produces principals; the token service issues tokens for their username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique username, used as the token subject
    pub username: String,
}

impl Principal {
    /// Creates a principal for the given username
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
