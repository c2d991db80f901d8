mod config;
mod credentials;
mod errors;
mod export;
mod generation;
mod layout;
mod llm_client;
mod models;
mod routes;
mod state;
mod templates;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coverly v{}", env!("CARGO_PKG_VERSION"));

    let credentials = CredentialStore::new(&config.data_dir);
    // Derive the cipher key before serving; requests then only decrypt.
    credentials.warm();
    info!(
        "Credential store at {} (stored key: {}, env key: {})",
        credentials.path().display(),
        credentials.load().is_some(),
        config.gemini_api_key.is_some()
    );

    let gemini = GeminiClient::new(&config, credentials.clone())?;
    info!("LLM client initialized (model: {})", gemini.model());

    let state = AppState::new(config.clone(), Arc::new(gemini), credentials);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Loopback only: this is a single-user local service.
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
