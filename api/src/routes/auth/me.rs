use actix_web::HttpResponse;

use crate::dto::MeResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /auth/me
///
/// Requires a valid bearer token; returns the username it was issued for.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        username: auth.subject,
    })
}
