//! Startup wiring derived from the application configuration

use std::sync::Arc;

use anyhow::{bail, Context};
use ig_core::services::token::TokenService;
use ig_shared::config::AppConfig;
use tracing::warn;

/// Builds the process-wide token service
///
/// Refuses to start in production with the built-in development secret.
/// Any signing misconfiguration is fatal.
pub fn token_service_from(config: &AppConfig) -> anyhow::Result<Arc<TokenService>> {
    let jwt = &config.auth.jwt;

    if jwt.is_using_default_secret() {
        if config.environment.is_production() {
            bail!("JWT_SECRET must be set in production");
        }
        warn!("Using the default development JWT secret");
    }

    let service = TokenService::from_config(jwt).context("invalid token signing configuration")?;
    Ok(Arc::new(service))
}
