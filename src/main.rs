mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod pdf;
mod repository;
mod service;
mod translation;

use std::sync::Arc;

use handlers::rest::{self, AppState};
use translation::ProviderChain;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Config loading
    let config = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });
    error::set_development_mode(config.is_development());

    // Provider chain creation
    let chain = ProviderChain::from_config(&config.translation).unwrap_or_else(|e| {
        tracing::error!("Failed to build translation clients: {e}");
        panic!("failed to build translation clients: {e}");
    });
    tracing::info!("Translation providers: {}", chain.provider_names().join(" -> "));

    // Router config
    let state = Arc::new(AppState::new(chain));
    let app = rest::router(state, config.max_upload_size);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", config.port);
            panic!("failed to bind port {}: {e}", config.port);
        });

    // Starting router
    tracing::info!(
        "Translation gateway ({}) listening on {}",
        config.environment,
        config.port
    );
    tracing::info!("API docs available at /swagger-ui");
    axum::serve(listener, app)
        .await
        .expect("failed to start server");
}
