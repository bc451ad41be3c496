//! Unit tests for authentication service

use std::sync::Arc;

use chrono::Duration;

use crate::domain::value_objects::BEARER_TOKEN_TYPE;
use crate::errors::{AuthError, DomainError};
use crate::services::auth::{AuthService, CredentialVerifier, InMemoryCredentialStore};
use crate::services::token::{ManualClock, SigningKey, TokenService, TokenServiceConfig};
use jsonwebtoken::Algorithm;

use super::mocks::*;

const SECRET: &[u8] = b"auth-service-test-secret-32-bytes!!";
const TEST_BCRYPT_COST: u32 = 4;

fn token_service(clock: Arc<ManualClock>) -> Arc<TokenService> {
    let config = TokenServiceConfig {
        algorithm: Algorithm::HS256,
        access_token_ttl: Duration::minutes(30),
    };
    let key = SigningKey::from_secret(SECRET, Algorithm::HS256).unwrap();
    Arc::new(TokenService::new(config, key, clock))
}

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::at_timestamp(1_700_000_000))
}

fn service_with(verifier: MockCredentialVerifier) -> AuthService<MockCredentialVerifier> {
    AuthService::new(Arc::new(verifier), token_service(clock()))
}

#[tokio::test]
async fn test_sign_in_success() {
    let service = service_with(MockCredentialVerifier::new().with_user("alice", "s3cret"));

    let response = service.sign_in("alice", "s3cret").await.unwrap();

    assert_eq!(response.username, "alice");
    assert_eq!(response.token_type, BEARER_TOKEN_TYPE);
    assert_eq!(response.expires_in, 1800);
    assert!(service.token_service().validate(response.token.as_str()));
    assert_eq!(
        service
            .token_service()
            .extract_subject(response.token.as_str())
            .unwrap(),
        "alice"
    );
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let service = service_with(MockCredentialVerifier::new().with_user("alice", "s3cret"));

    let result = service.sign_in("alice", "wrong").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AuthenticationFailed))
    ));
}

#[tokio::test]
async fn test_sign_in_unknown_user() {
    let service = service_with(MockCredentialVerifier::new().with_user("alice", "s3cret"));

    let result = service.sign_in("mallory", "s3cret").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::AuthenticationFailed))
    ));
}

#[tokio::test]
async fn test_blank_credentials_skip_verifier() {
    let verifier = Arc::new(MockCredentialVerifier::new().with_user("alice", "s3cret"));
    let service = AuthService::new(Arc::clone(&verifier), token_service(clock()));

    for (username, password) in [("", "s3cret"), ("alice", ""), ("", "")] {
        let result = service.sign_in(username, password).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::AuthenticationFailed))
        ));
    }

    assert_eq!(verifier.call_count(), 0);
}

#[tokio::test]
async fn test_verifier_errors_propagate() {
    let service = AuthService::new(Arc::new(FailingCredentialVerifier), token_service(clock()));

    let result = service.sign_in("alice", "s3cret").await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_issued_token_expires_with_clock() {
    let clock = clock();
    let service = AuthService::new(
        Arc::new(MockCredentialVerifier::new().with_user("alice", "s3cret")),
        token_service(Arc::clone(&clock)),
    );

    let response = service.sign_in("alice", "s3cret").await.unwrap();
    assert!(service.token_service().validate(response.token.as_str()));

    clock.advance(Duration::minutes(31));
    assert!(!service.token_service().validate(response.token.as_str()));
}

#[tokio::test]
async fn test_in_memory_store_register_and_verify() {
    let store = InMemoryCredentialStore::with_cost(TEST_BCRYPT_COST);

    let principal = store.register("alice", "s3cret").await.unwrap();
    assert_eq!(principal.username, "alice");
    assert_eq!(store.len().await, 1);

    assert_eq!(store.verify("alice", "s3cret").await.unwrap(), principal);
    assert!(matches!(
        store.verify("alice", "wrong").await,
        Err(DomainError::Auth(AuthError::AuthenticationFailed))
    ));
    assert!(matches!(
        store.verify("bob", "s3cret").await,
        Err(DomainError::Auth(AuthError::AuthenticationFailed))
    ));
}

#[tokio::test]
async fn test_in_memory_store_rejects_duplicates_and_blanks() {
    let store = InMemoryCredentialStore::with_cost(TEST_BCRYPT_COST);
    assert!(store.is_empty().await);

    store.register("alice", "s3cret").await.unwrap();

    assert!(matches!(
        store.register("alice", "other").await,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert!(matches!(
        store.register("", "pw").await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        store.register("bob", "").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_sign_in_with_in_memory_store() {
    let store = InMemoryCredentialStore::with_cost(TEST_BCRYPT_COST);
    store.register("alice", "s3cret").await.unwrap();
    let service = AuthService::new(Arc::new(store), token_service(clock()));

    let response = service.sign_in("alice", "s3cret").await.unwrap();
    assert!(service.token_service().validate(response.token.as_str()));

    assert!(service.sign_in("alice", "nope").await.is_err());
}
