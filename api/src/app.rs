//! Application factory
//!
//! Builds the Actix-web application from the shared application state.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use ig_core::services::auth::CredentialVerifier;
use ig_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{me, signin, AppState};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
pub fn create_app<V>(
    app_state: web::Data<AppState<V>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    V: CredentialVerifier + 'static,
{
    let token_service = Arc::clone(app_state.auth_service.token_service());

    // Malformed JSON bodies get the same error envelope as validation failures
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::BAD_REQUEST,
            err.to_string(),
        ));
        InternalError::from_response(err, response).into()
    });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route("/signin", web::post().to(signin::<V>))
                .service(
                    web::resource("/me")
                        .route(web::get().to(me))
                        .wrap(JwtAuth::new(token_service)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
