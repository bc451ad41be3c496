//! HMAC signing key management for token signing and verification

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::TokenError;

/// Prefix marking a configured secret as base64-encoded
pub const BASE64_SECRET_PREFIX: &str = "base64:";

/// Process-wide symmetric signing key
///
/// Built once at startup and never mutated; every token issued or verified
/// by one process uses the same key. The secret bytes are not kept beyond the
/// `jsonwebtoken` key handles and never appear in `Debug` output.
#[derive(Clone)]
pub struct SigningKey {
    /// HMAC algorithm the key signs with
    algorithm: Algorithm,
    /// Key for signing tokens
    encoding_key: EncodingKey,
    /// Key for verifying tokens
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Creates a signing key from raw secret bytes
    ///
    /// # Errors
    ///
    /// `ConfigurationFault` when the algorithm is not HMAC-based, or when the
    /// secret is shorter than the algorithm's digest (32, 48 or 64 bytes).
    pub fn from_secret(secret: &[u8], algorithm: Algorithm) -> Result<Self, TokenError> {
        let minimum = minimum_secret_len(algorithm)?;
        if secret.is_empty() {
            return Err(TokenError::configuration("signing secret is empty"));
        }
        if secret.len() < minimum {
            return Err(TokenError::configuration(format!(
                "{:?} requires a secret of at least {} bytes, got {}",
                algorithm,
                minimum,
                secret.len()
            )));
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// Creates a signing key from a standard base64-encoded secret
    pub fn from_base64_secret(encoded: &str, algorithm: Algorithm) -> Result<Self, TokenError> {
        let secret = STANDARD
            .decode(encoded.trim())
            .map_err(|e| TokenError::configuration(format!("invalid base64 secret: {}", e)))?;
        Self::from_secret(&secret, algorithm)
    }

    /// Creates a signing key from a configured secret string
    ///
    /// Secrets prefixed with [`BASE64_SECRET_PREFIX`] are base64-decoded,
    /// anything else is used as raw UTF-8 bytes.
    pub fn from_config_secret(secret: &str, algorithm: Algorithm) -> Result<Self, TokenError> {
        match secret.strip_prefix(BASE64_SECRET_PREFIX) {
            Some(encoded) => Self::from_base64_secret(encoded, algorithm),
            None => Self::from_secret(secret.as_bytes(), algorithm),
        }
    }

    /// Algorithm the key signs with
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// Parses a configured algorithm name, accepting only the HMAC family
pub fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, TokenError> {
    let algorithm: Algorithm = name
        .trim()
        .to_uppercase()
        .parse()
        .map_err(|_| TokenError::configuration(format!("unknown signing algorithm '{}'", name)))?;
    minimum_secret_len(algorithm)?;
    Ok(algorithm)
}

fn minimum_secret_len(algorithm: Algorithm) -> Result<usize, TokenError> {
    match algorithm {
        Algorithm::HS256 => Ok(32),
        Algorithm::HS384 => Ok(48),
        Algorithm::HS512 => Ok(64),
        other => Err(TokenError::configuration(format!(
            "{:?} is not a symmetric signing algorithm",
            other
        ))),
    }
}
