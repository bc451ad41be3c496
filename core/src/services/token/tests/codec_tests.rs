//! Unit tests for the token codec

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};

use super::{manual_clock, signing_key, OTHER_SECRET, SECRET};
use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::services::token::{Clock, DecodeFailure, TokenCodec};

fn codec_at_start() -> (TokenCodec, Arc<crate::services::token::ManualClock>) {
    let clock = manual_clock();
    (TokenCodec::new(signing_key(SECRET), clock.clone()), clock)
}

fn claims_for(subject: &str, clock: &dyn Clock, ttl: Duration) -> Claims {
    let now = clock.now();
    Claims::new(subject, now, now + ttl)
}

#[test]
fn test_encode_produces_three_base64url_segments() {
    let (codec, clock) = codec_at_start();
    let token = codec.encode(&claims_for("alice", &*clock, Duration::hours(1))).unwrap();

    let segments: Vec<&str> = token.segments().collect();
    assert_eq!(segments.len(), 3);
    for segment in &segments {
        assert!(!segment.is_empty());
        assert!(URL_SAFE_NO_PAD.decode(segment).is_ok());
    }

    let header: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
    assert_eq!(header["alg"], "HS256");
    assert_eq!(header["typ"], "JWT");

    let payload: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
    assert_eq!(payload["sub"], "alice");
    assert_eq!(payload["exp"].as_i64().unwrap() - payload["iat"].as_i64().unwrap(), 3600);
}

#[test]
fn test_decode_valid_token() {
    let (codec, clock) = codec_at_start();
    let claims = claims_for("alice", &*clock, Duration::hours(1))
        .with_extension("role", "viewer")
        .unwrap();
    let token = codec.encode(&claims).unwrap();

    assert_eq!(codec.decode(token.as_str()), Ok(claims));
}

#[test]
fn test_decode_is_repeatable() {
    let (codec, clock) = codec_at_start();
    let token = codec.encode(&claims_for("alice", &*clock, Duration::hours(1))).unwrap();

    assert_eq!(codec.decode(token.as_str()), codec.decode(token.as_str()));
}

#[test]
fn test_structurally_invalid_inputs_are_malformed() {
    let (codec, _) = codec_at_start();

    for input in ["", "not-a-token", "a.b", "a.b.c.d", "a..c", ".b.c", "a.b.", "..", "..."] {
        let failure = codec.decode(input).unwrap_err();
        assert!(
            matches!(failure, DecodeFailure::MalformedInput { .. }),
            "{:?} should be malformed, got {:?}",
            input,
            failure
        );
    }
}

#[test]
fn test_undecodable_segments_are_malformed() {
    let (codec, _) = codec_at_start();

    let failure = codec.decode("abc.def.ghi").unwrap_err();
    assert_eq!(failure.kind(), "malformed");

    let failure = codec.decode("!!!.@@@.###").unwrap_err();
    assert_eq!(failure.kind(), "malformed");
}

#[test]
fn test_wrong_key_is_signature_mismatch() {
    let (codec, clock) = codec_at_start();
    let foreign = TokenCodec::new(signing_key(OTHER_SECRET), clock.clone());
    let token = foreign
        .encode(&claims_for("mallory", &*clock, Duration::hours(1)))
        .unwrap();

    assert_eq!(
        codec.decode(token.as_str()),
        Err(DecodeFailure::SignatureMismatch)
    );
}

#[test]
fn test_tampered_payload_is_signature_mismatch() {
    let (codec, clock) = codec_at_start();
    let token = codec.encode(&claims_for("alice", &*clock, Duration::hours(1))).unwrap();
    let segments: Vec<&str> = token.segments().collect();

    let forged_claims = claims_for("admin", &*clock, Duration::days(365));
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
    let forged = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

    assert_eq!(codec.decode(&forged), Err(DecodeFailure::SignatureMismatch));
}

#[test]
fn test_foreign_algorithm_header_is_signature_mismatch() {
    let (codec, clock) = codec_at_start();
    let claims = claims_for("alice", &*clock, Duration::hours(1));
    let token = encode(
        &Header::new(jsonwebtoken::Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert_eq!(codec.decode(&token), Err(DecodeFailure::SignatureMismatch));
}

#[test]
fn test_correctly_signed_payload_without_subject_is_malformed() {
    let (codec, clock) = codec_at_start();
    let now = clock.now().timestamp();
    let payload = serde_json::json!({ "iat": now, "exp": now + 3600 });
    let token = encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    let failure = codec.decode(&token).unwrap_err();
    assert!(matches!(failure, DecodeFailure::MalformedInput { .. }));
}

#[test]
fn test_empty_subject_is_malformed() {
    let (codec, clock) = codec_at_start();
    let token = codec.encode(&claims_for("", &*clock, Duration::hours(1))).unwrap();

    assert_eq!(
        codec.decode(token.as_str()),
        Err(DecodeFailure::MalformedInput {
            reason: "empty subject"
        })
    );
}

#[test]
fn test_expiry_is_judged_by_injected_clock() {
    let (codec, clock) = codec_at_start();
    let claims = claims_for("alice", &*clock, Duration::hours(1));
    let token = codec.encode(&claims).unwrap();

    clock.advance(Duration::minutes(59));
    assert!(codec.decode(token.as_str()).is_ok());

    clock.advance(Duration::minutes(1));
    assert_eq!(
        codec.decode(token.as_str()),
        Err(DecodeFailure::Expired {
            claims: claims.clone()
        })
    );

    // Expiry is re-derived on every decode.
    clock.advance(Duration::minutes(-30));
    assert_eq!(codec.decode(token.as_str()), Ok(claims));
}

#[test]
fn test_expired_and_forged_stays_signature_mismatch() {
    let (codec, clock) = codec_at_start();
    let foreign = TokenCodec::new(signing_key(OTHER_SECRET), clock.clone());
    let token = foreign
        .encode(&claims_for("mallory", &*clock, Duration::seconds(-10)))
        .unwrap();

    assert_eq!(
        codec.decode(token.as_str()),
        Err(DecodeFailure::SignatureMismatch)
    );
}

#[test]
fn test_decode_failure_into_token_error() {
    assert_eq!(
        TokenError::from(DecodeFailure::MalformedInput { reason: "x" }),
        TokenError::MalformedToken
    );
    assert_eq!(
        TokenError::from(DecodeFailure::SignatureMismatch),
        TokenError::BadSignature
    );
}
