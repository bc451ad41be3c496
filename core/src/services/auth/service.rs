//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::value_objects::LoginResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::services::token::TokenService;

use super::traits::CredentialVerifier;

/// Authentication service turning verified credentials into bearer tokens
pub struct AuthService<V>
where
    V: CredentialVerifier,
{
    /// Credential verification collaborator
    verifier: Arc<V>,
    /// Service for token issuance
    token_service: Arc<TokenService>,
}

impl<V> AuthService<V>
where
    V: CredentialVerifier,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `verifier` - Checks usernames and passwords
    /// * `token_service` - Issues tokens for verified principals
    pub fn new(verifier: Arc<V>, token_service: Arc<TokenService>) -> Self {
        Self {
            verifier,
            token_service,
        }
    }

    /// The token service used for issuance
    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    /// Sign in with username and password
    ///
    /// This method:
    /// 1. Rejects blank credentials without consulting the verifier
    /// 2. Verifies the credentials
    /// 3. Issues an access token for the verified username
    ///
    /// # Errors
    ///
    /// * `AuthError::AuthenticationFailed` - blank, unknown or wrong credentials
    /// * `DomainError::Token` - the token could not be issued
    pub async fn sign_in(&self, username: &str, password: &str) -> DomainResult<LoginResponse> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::AuthenticationFailed.into());
        }

        let principal = match self.verifier.verify(username, password).await {
            Ok(principal) => principal,
            Err(e) => {
                warn!(username, error = %e, "Sign-in rejected");
                return Err(e);
            }
        };

        let token = self
            .token_service
            .issue_access_token(&principal.username)
            .map_err(DomainError::from)?;

        info!(username = %principal.username, "User signed in");

        Ok(LoginResponse::bearer(
            principal.username,
            token.into_string(),
            self.token_service.access_token_ttl().num_seconds(),
        ))
    }
}
