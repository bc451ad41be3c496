//! HTTP surface for sign-in and bearer-token authentication
//!
//! Exposes the application factory used by the binary and by the
//! integration tests.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
