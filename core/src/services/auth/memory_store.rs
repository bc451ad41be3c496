//! In-memory credential store backed by bcrypt hashes

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::entities::user::Principal;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::traits::CredentialVerifier;

/// Credential store holding bcrypt hashes keyed by username
///
/// Suitable for development and tests; hashing runs on the blocking pool.
pub struct InMemoryCredentialStore {
    hashes: RwLock<HashMap<String, String>>,
    cost: u32,
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCredentialStore {
    /// Creates an empty store using bcrypt's default cost
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Creates an empty store with an explicit bcrypt cost
    pub fn with_cost(cost: u32) -> Self {
        Self {
            hashes: RwLock::new(HashMap::new()),
            cost,
        }
    }

    /// Registers a user with the given password
    ///
    /// # Errors
    ///
    /// * `Validation` - empty username or password
    /// * `AuthError::UserAlreadyExists` - the username is taken
    pub async fn register(&self, username: &str, password: &str) -> DomainResult<Principal> {
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::Validation {
                message: "username and password are required".to_string(),
            });
        }
        if self.hashes.read().await.contains_key(username) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let hash = hash_password(password.to_string(), self.cost).await?;

        let mut hashes = self.hashes.write().await;
        if hashes.contains_key(username) {
            return Err(AuthError::UserAlreadyExists.into());
        }
        hashes.insert(username.to_string(), hash);
        info!(username, "Registered user");

        Ok(Principal::new(username))
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.hashes.read().await.len()
    }

    /// Whether no users are registered
    pub async fn is_empty(&self) -> bool {
        self.hashes.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Result<Principal, DomainError> {
        let hash = self.hashes.read().await.get(username).cloned();
        let Some(hash) = hash else {
            debug!(username, "Unknown user");
            return Err(AuthError::AuthenticationFailed.into());
        };

        let password = password.to_string();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("password verification task failed: {}", e),
            })?
            .map_err(|e| AuthError::PasswordHashing {
                message: e.to_string(),
            })?;

        if matches {
            Ok(Principal::new(username))
        } else {
            debug!(username, "Password mismatch");
            Err(AuthError::AuthenticationFailed.into())
        }
    }
}

async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("password hashing task failed: {}", e),
        })?
        .map_err(|e| {
            AuthError::PasswordHashing {
                message: e.to_string(),
            }
            .into()
        })
}
