mod ats;
mod config;
mod errors;
mod layout;
mod models;
mod patterns;
mod routes;
mod semantic;
mod state;
mod visa;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::semantic::{EmbeddingProvider, OpenAiEmbeddings};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scorer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize embedding provider
    let embeddings = OpenAiEmbeddings::new(
        config.embedding_api_url.clone(),
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
    )?;
    info!(
        "Embedding provider initialized (model: {}, {} dimensions)",
        embeddings.model(),
        embeddings.dimensions()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        embeddings: Arc::new(embeddings),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
