use actix_web::{web, HttpResponse};
use tracing::warn;
use validator::Validate;

use crate::dto::LoginRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use ig_core::services::auth::CredentialVerifier;

use super::AppState;

/// Handler for POST /auth/signin
///
/// Verifies the credentials and returns a bearer token.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "password": "correct horse battery staple"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "username": "alice",
///     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "token_type": "Bearer",
///     "expires_in": 3600
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing username or password
/// - 401 Unauthorized: Unknown user or wrong password
pub async fn signin<V>(
    state: web::Data<AppState<V>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    V: CredentialVerifier + 'static,
{
    if let Err(errors) = request.validate() {
        warn!(errors = ?errors.field_errors().keys().collect::<Vec<_>>(), "Invalid sign-in request");
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .sign_in(&request.username, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(&error),
    }
}
