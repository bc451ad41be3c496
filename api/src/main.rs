use std::env;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use ig_api::app::create_app;
use ig_api::config::token_service_from;
use ig_api::routes::auth::AppState;
use ig_api::telemetry::init_tracing;
use ig_core::services::auth::{AuthService, InMemoryCredentialStore};
use ig_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config.logging);
    info!(environment = %config.environment, "Starting Instagram API server");

    let token_service = token_service_from(&config)?;

    let store = InMemoryCredentialStore::new();
    seed_demo_user(&store).await?;

    let auth_service = Arc::new(AuthService::new(Arc::new(store), token_service));
    let app_state = web::Data::new(AppState::new(auth_service));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}

/// Registers the user named by `DEMO_USERNAME`/`DEMO_PASSWORD`, if both are set
async fn seed_demo_user(store: &InMemoryCredentialStore) -> anyhow::Result<()> {
    match (env::var("DEMO_USERNAME"), env::var("DEMO_PASSWORD")) {
        (Ok(username), Ok(password)) => {
            store
                .register(&username, &password)
                .await
                .context("failed to register demo user")?;
            info!(username = %username, "Registered demo user");
        }
        _ => warn!("No DEMO_USERNAME/DEMO_PASSWORD set; sign-in will reject every user"),
    }
    Ok(())
}
