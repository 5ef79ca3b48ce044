mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::machine::Interviewer;
use crate::interview::session::SessionRegistry;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::CandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails startup on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM gateway
    let llm = Arc::new(LlmClient::new(config.groq_api_key.clone()));
    info!(
        "LLM client initialized (fast: {}, scoring: {})",
        llm_client::FAST_MODEL,
        llm_client::SCORING_MODEL
    );

    // Initialize the append-only candidate record store
    let store = Arc::new(CandidateStore::new(config.candidate_data_file.clone()));
    info!("Candidate store: {}", config.candidate_data_file);

    // Build app state
    let state = AppState {
        interviewer: Interviewer::new(llm, store),
        sessions: SessionRegistry::new(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
