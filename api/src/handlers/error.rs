//! Conversion of domain errors into HTTP responses
//!
//! Token and credential failures share one generic 401 body so callers
//! cannot tell which check failed.

use std::collections::HashMap;

use actix_web::{error::InternalError, HttpResponse};
use ig_core::errors::{AuthError, DomainError, TokenError};
use ig_shared::errors::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Message returned for every rejected bearer token
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required";

/// Generic 401 response for missing or unacceptable bearer tokens
pub fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        UNAUTHORIZED_MESSAGE,
    ))
}

/// The 401 response wrapped as an actix error, for middleware and extractors
pub fn unauthorized_error() -> actix_web::Error {
    InternalError::from_response(UNAUTHORIZED_MESSAGE, unauthorized()).into()
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::AuthenticationFailed => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    error_codes::AUTHENTICATION_FAILED,
                    "Invalid username or password",
                ))
            }
            AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorResponse::new(
                error_codes::CONFLICT,
                "User already exists",
            )),
            AuthError::PasswordHashing { .. } => internal_error(error),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::InvalidArgument { field } => {
                HttpResponse::BadRequest().json(ErrorResponse::new(
                    error_codes::BAD_REQUEST,
                    format!("{} is required", field),
                ))
            }
            TokenError::MalformedToken | TokenError::BadSignature | TokenError::Expired => {
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    error_codes::TOKEN_INVALID,
                    UNAUTHORIZED_MESSAGE,
                ))
            }
            TokenError::ConfigurationFault { .. } => internal_error(error),
        },
        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::Internal { .. } => internal_error(error),
    }
}

/// 400 response listing the failing fields
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (field, errors) in errors.field_errors() {
        let messages = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}

fn internal_error(error: &DomainError) -> HttpResponse {
    tracing::error!(error = %error, "Request failed with internal error");
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                DomainError::Auth(AuthError::AuthenticationFailed),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Auth(AuthError::UserAlreadyExists),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Token(TokenError::BadSignature),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Token(TokenError::InvalidArgument { field: "token" }),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Token(TokenError::configuration("no key")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::Validation {
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Internal {
                    message: "boom".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(&error).status(), status, "{:?}", error);
        }
    }

    #[test]
    fn test_unauthorized_is_generic() {
        assert_eq!(unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            unauthorized_error().as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
