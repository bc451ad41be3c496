//! Value objects returned across the service boundary.

pub mod auth_response;

pub use auth_response::{LoginResponse, BEARER_TOKEN_TYPE};
