//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use ig_shared::config::JwtConfig;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::token::{Claims, Token};
use crate::errors::TokenError;

use super::clock::{Clock, SystemClock};
use super::codec::{DecodeFailure, TokenCodec};
use super::config::TokenServiceConfig;
use super::key_manager::SigningKey;

/// Service for issuing and validating bearer tokens
///
/// Holds only read-only state (key, clock, configuration), so one instance
/// behind an `Arc` serves any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct TokenService {
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    /// * `key` - Process-wide signing key
    /// * `clock` - Time source for issuance and expiry checks
    pub fn new(config: TokenServiceConfig, key: SigningKey, clock: Arc<dyn Clock>) -> Self {
        let codec = TokenCodec::new(key, Arc::clone(&clock));
        Self {
            codec,
            clock,
            config,
        }
    }

    /// Creates a token service from the shared JWT settings using the system clock
    ///
    /// # Errors
    ///
    /// `ConfigurationFault` when the algorithm, expiry or secret is unusable.
    /// Callers should treat this as fatal at startup.
    pub fn from_config(jwt: &JwtConfig) -> Result<Self, TokenError> {
        let config = TokenServiceConfig::from_jwt_config(jwt)?;
        let key = SigningKey::from_config_secret(&jwt.secret, config.algorithm)?;
        Ok(Self::new(config, key, Arc::new(SystemClock)))
    }

    /// Lifetime of tokens issued by [`issue_access_token`](Self::issue_access_token)
    pub fn access_token_ttl(&self) -> Duration {
        self.config.access_token_ttl
    }

    /// Issues a token for `subject` expiring `ttl` after now
    ///
    /// A non-positive `ttl` yields a token that is already expired.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - `subject` is empty or `ttl` overflows the calendar
    /// * `ConfigurationFault` - the signing key is unusable
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<Token, TokenError> {
        self.issue_with_extensions(subject, ttl, std::iter::empty())
    }

    /// Issues a token with the configured access token lifetime
    pub fn issue_access_token(&self, subject: &str) -> Result<Token, TokenError> {
        self.issue(subject, self.config.access_token_ttl)
    }

    /// Issues a token carrying additional opaque claims
    ///
    /// # Errors
    ///
    /// Same as [`issue`](Self::issue), plus `InvalidArgument` when an
    /// extension key is empty or shadows `sub`, `iat` or `exp`.
    pub fn issue_with_extensions<I>(
        &self,
        subject: &str,
        ttl: Duration,
        extensions: I,
    ) -> Result<Token, TokenError>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if subject.is_empty() {
            return Err(TokenError::InvalidArgument { field: "subject" });
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::InvalidArgument { field: "ttl" })?;

        let mut claims = Claims::new(subject, issued_at, expires_at);
        for (key, value) in extensions {
            claims = claims.with_extension(key, value)?;
        }

        let token = self.codec.encode(&claims)?;
        debug!(subject, expires_at = %expires_at, "Issued token");
        Ok(token)
    }

    /// Returns true iff the token is correctly signed and not expired
    ///
    /// Never fails: null, empty, malformed, forged and expired tokens all
    /// collapse to `false`.
    pub fn validate<'a>(&self, token: impl Into<Option<&'a str>>) -> bool {
        match token.into() {
            None | Some("") => {
                debug!("Rejected missing token");
                false
            }
            Some(token) => self.inspect(token).is_ok(),
        }
    }

    /// Extracts the subject from a correctly signed token
    ///
    /// Expiry is not enforced here; use [`validate`](Self::validate)
    /// for acceptance decisions.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - the token is null or empty
    /// * `BadSignature` - any other decode failure, including malformed input
    pub fn extract_subject<'a>(
        &self,
        token: impl Into<Option<&'a str>>,
    ) -> Result<String, TokenError> {
        let token = match token.into() {
            None | Some("") => return Err(TokenError::InvalidArgument { field: "token" }),
            Some(token) => token,
        };

        match self.inspect(token) {
            Ok(claims) | Err(DecodeFailure::Expired { claims }) => Ok(claims.sub),
            Err(_) => Err(TokenError::BadSignature),
        }
    }

    /// Decodes a token and reports the precise outcome
    ///
    /// Intended for internal diagnostics and tests; the reason must not be
    /// relayed to clients.
    pub fn inspect(&self, token: &str) -> Result<Claims, DecodeFailure> {
        let outcome = self.codec.decode(token);
        if let Err(failure) = &outcome {
            match failure {
                DecodeFailure::MalformedInput { reason } => {
                    debug!(kind = failure.kind(), reason, "Rejected malformed token");
                }
                DecodeFailure::SignatureMismatch => {
                    warn!(kind = failure.kind(), "Token signature verification failed");
                }
                DecodeFailure::Expired { claims } => {
                    debug!(kind = failure.kind(), subject = %claims.sub, "Rejected expired token");
                }
            }
        }
        outcome
    }
}
