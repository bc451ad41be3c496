//! Trait for credential verification integration

use async_trait::async_trait;

use crate::domain::entities::user::Principal;
use crate::errors::DomainError;

/// Verifies a username and secret, producing a verified principal
///
/// Implementations must fail with `AuthError::AuthenticationFailed` for
/// unknown users and wrong secrets alike.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check the credentials and return the principal they identify
    async fn verify(&self, username: &str, password: &str) -> Result<Principal, DomainError>;
}
