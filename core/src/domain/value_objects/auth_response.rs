//! Sign-in response value object for API responses.

use serde::{Deserialize, Serialize};

/// Token type advertised to clients for the `Authorization` header
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Response returned after a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    /// Username of the authenticated principal
    pub username: String,

    /// Signed bearer token
    pub token: String,

    /// Always [`BEARER_TOKEN_TYPE`]
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl LoginResponse {
    /// Creates a bearer login response
    pub fn bearer(username: impl Into<String>, token: impl Into<String>, expires_in: i64) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}
