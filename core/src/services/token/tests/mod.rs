//! Tests for the token codec and token service

mod codec_tests;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use jsonwebtoken::Algorithm;

use super::{ManualClock, SigningKey, TokenService, TokenServiceConfig};

pub(crate) const SECRET: &[u8] = b"test-secret-with-at-least-32-bytes!!";
pub(crate) const OTHER_SECRET: &[u8] = b"another-secret-with-32-bytes-or-more";
pub(crate) const START: i64 = 1_700_000_000;

pub(crate) fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.timestamp_opt(START, 0).unwrap()))
}

pub(crate) fn signing_key(secret: &[u8]) -> SigningKey {
    SigningKey::from_secret(secret, Algorithm::HS256).expect("valid test key")
}

pub(crate) fn service_with_clock(secret: &[u8], clock: Arc<ManualClock>) -> TokenService {
    TokenService::new(TokenServiceConfig::default(), signing_key(secret), clock)
}
