//! Configuration for the token service

use chrono::Duration;
use ig_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::errors::TokenError;

use super::key_manager::parse_hmac_algorithm;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing algorithm (HMAC family)
    pub algorithm: Algorithm,
    /// Lifetime of tokens issued at sign-in
    pub access_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::hours(1),
        }
    }
}

impl TokenServiceConfig {
    /// Derives the service configuration from the shared JWT settings
    ///
    /// # Errors
    ///
    /// `ConfigurationFault` for a non-HMAC algorithm or a non-positive expiry.
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, TokenError> {
        let algorithm = parse_hmac_algorithm(&jwt.algorithm)?;

        if jwt.access_token_expiry <= 0 {
            return Err(TokenError::configuration(format!(
                "access token expiry must be positive, got {}",
                jwt.access_token_expiry
            )));
        }
        let access_token_ttl = Duration::try_seconds(jwt.access_token_expiry).ok_or_else(|| {
            TokenError::configuration("access token expiry is out of range")
        })?;

        Ok(Self {
            algorithm,
            access_token_ttl,
        })
    }
}
