//! Token entities for stateless bearer authentication.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TokenError;

/// Registered claim names that extension claims may not shadow
pub const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Claims structure for the token payload
///
/// Timestamps are unix seconds, matching the registered JWT claim names so
/// third-party tooling can read the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username of the authenticated principal)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Opaque extension claims, not interpreted by the token service
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

impl Claims {
    /// Creates claims for `subject` valid from `issued_at` until `expires_at`
    ///
    /// `exp` is rounded up to the next whole second, so a token never expires
    /// before `expires_at` and any positive lifetime gives `exp > iat`.
    pub fn new(
        subject: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: ceil_timestamp(expires_at),
            extensions: BTreeMap::new(),
        }
    }

    /// Adds an extension claim
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the key is empty or one of [`RESERVED_CLAIMS`].
    pub fn with_extension(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, TokenError> {
        let key = key.into();
        if key.is_empty() || RESERVED_CLAIMS.contains(&key.as_str()) {
            return Err(TokenError::InvalidArgument {
                field: "extension claim",
            });
        }
        self.extensions.insert(key, value.into());
        Ok(self)
    }

    /// Looks up an extension claim
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Issue time, if the timestamp is representable
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    /// Expiry time, if the timestamp is representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token is expired from the second of `exp` onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

fn ceil_timestamp(at: DateTime<Utc>) -> i64 {
    if at.timestamp_subsec_nanos() > 0 {
        at.timestamp() + 1
    } else {
        at.timestamp()
    }
}

/// Compact signed token: `header.payload.signature`, each segment base64url
///
/// Tokens are bearer credentials, so `Debug` never prints the contents.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Segment separator of the compact form
    pub const SEPARATOR: char = '.';

    pub(crate) fn new(compact: String) -> Self {
        Self(compact)
    }

    /// Borrows the compact string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning the compact string
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterates over the dot-separated segments
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split(Self::SEPARATOR)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}
