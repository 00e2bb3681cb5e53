mod config;
mod errors;
mod extract;
mod generation;
mod interview;
mod llm_client;
mod models;
mod profile;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::registry::SessionRegistry;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryProfileStore, ProfileStore, Profiles, RedisProfileStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerPilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize profile store
    let store: Arc<dyn ProfileStore> = match &config.redis_url {
        Some(url) => {
            let redis = redis::Client::open(url.clone())?;
            info!("Redis profile store initialized (key prefix: {})", config.storage_key);
            Arc::new(RedisProfileStore::new(redis, config.storage_key.clone()))
        }
        None => {
            warn!("REDIS_URL not set; profiles will not survive a restart");
            Arc::new(MemoryProfileStore::default())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    let state = AppState {
        llm: Arc::new(llm),
        profiles: Profiles::new(store),
        sessions: SessionRegistry::new(Duration::from_secs(config.interview_idle_secs)),
    };

    // TODO: restrict CORS origins once the web client has a fixed host
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
