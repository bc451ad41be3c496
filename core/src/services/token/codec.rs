//! Compact token codec: claims to `header.payload.signature` and back

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use thiserror::Error;

use crate::domain::entities::token::{Claims, Token};
use crate::errors::TokenError;

use super::clock::Clock;
use super::key_manager::SigningKey;

/// Why a token string did not decode to valid claims
///
/// The three outcomes stay distinct so internal callers can tell untrusted
/// garbage from forgery from a token that simply aged out.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeFailure {
    /// Not structurally a three-segment token, or a segment is undecodable
    #[error("malformed token: {reason}")]
    MalformedInput { reason: &'static str },

    /// The recomputed signature differs from the supplied one
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Correctly signed, but the clock is at or past `exp`
    #[error("token expired")]
    Expired { claims: Claims },
}

impl DecodeFailure {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeFailure::MalformedInput { .. } => "malformed",
            DecodeFailure::SignatureMismatch => "signature_mismatch",
            DecodeFailure::Expired { .. } => "expired",
        }
    }
}

impl From<DecodeFailure> for TokenError {
    fn from(failure: DecodeFailure) -> Self {
        match failure {
            DecodeFailure::MalformedInput { .. } => TokenError::MalformedToken,
            DecodeFailure::SignatureMismatch => TokenError::BadSignature,
            DecodeFailure::Expired { .. } => TokenError::Expired,
        }
    }
}

/// Symmetric-key codec for compact signed tokens
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: SigningKey,
    header: Header,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a codec signing with `key` and judging expiry by `clock`
    pub fn new(key: SigningKey, clock: Arc<dyn Clock>) -> Self {
        let header = Header::new(key.algorithm());

        // Only the signature is checked by jsonwebtoken; expiry is compared
        // against the injected clock in `decode`.
        let mut validation = Validation::new(key.algorithm());
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            key,
            header,
            validation,
            clock,
        }
    }

    /// Signs the claims into a compact token
    ///
    /// # Errors
    ///
    /// `ConfigurationFault` if the key cannot produce a signature.
    pub fn encode(&self, claims: &Claims) -> Result<Token, TokenError> {
        encode(&self.header, claims, self.key.encoding_key())
            .map(Token::new)
            .map_err(|e| TokenError::configuration(format!("failed to sign token: {}", e)))
    }

    /// Verifies a compact token and returns its claims
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeFailure> {
        check_structure(token)?;

        let claims = decode::<Claims>(token, self.key.decoding_key(), &self.validation)
            .map_err(classify)?
            .claims;

        if claims.sub.is_empty() {
            return Err(DecodeFailure::MalformedInput {
                reason: "empty subject",
            });
        }

        if claims.is_expired_at(self.clock.now()) {
            return Err(DecodeFailure::Expired { claims });
        }

        Ok(claims)
    }
}

fn check_structure(token: &str) -> Result<(), DecodeFailure> {
    if token.is_empty() {
        return Err(DecodeFailure::MalformedInput {
            reason: "empty token",
        });
    }

    let mut segments = 0;
    for segment in token.split(Token::SEPARATOR) {
        if segment.is_empty() {
            return Err(DecodeFailure::MalformedInput {
                reason: "empty segment",
            });
        }
        segments += 1;
    }

    if segments != 3 {
        return Err(DecodeFailure::MalformedInput {
            reason: "expected three segments",
        });
    }

    Ok(())
}

fn classify(error: jsonwebtoken::errors::Error) -> DecodeFailure {
    match error.kind() {
        // A header naming another algorithm cannot have been signed by this key.
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            DecodeFailure::SignatureMismatch
        }
        ErrorKind::Base64(_) => DecodeFailure::MalformedInput {
            reason: "segment is not base64url",
        },
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => DecodeFailure::MalformedInput {
            reason: "segment is not valid JSON",
        },
        _ => DecodeFailure::MalformedInput {
            reason: "token rejected by verifier",
        },
    }
}
