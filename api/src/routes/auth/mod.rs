//! Authentication route handlers
//!
//! - Sign-in with username and password
//! - Identity of the bearer of a valid token

pub mod me;
pub mod signin;

use std::sync::Arc;

use ig_core::services::auth::{AuthService, CredentialVerifier};

pub use me::me;
pub use signin::signin;

/// Application state that holds shared services
pub struct AppState<V>
where
    V: CredentialVerifier,
{
    pub auth_service: Arc<AuthService<V>>,
}

impl<V> AppState<V>
where
    V: CredentialVerifier,
{
    pub fn new(auth_service: Arc<AuthService<V>>) -> Self {
        Self { auth_service }
    }
}
