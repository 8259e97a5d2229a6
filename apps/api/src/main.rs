mod assist;
mod config;
mod cvs;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod repository;
mod rfps;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assist::{Assistant, LlmAssistant, UnconfiguredAssistant};
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::matching::history::MatchHistory;
use crate::models::{Candidate, Rfp};
use crate::repository::{InMemoryStore, PgStore, Repository};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so RUST_LOG from .env is honoured
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV matching API v{}", env!("CARGO_PKG_VERSION"));

    // Record store: PostgreSQL when configured, process memory otherwise
    let (cvs, rfps) = match &config.database_url {
        Some(url) => {
            let store = PgStore::new(create_pool(url).await?);
            let cvs: Arc<dyn Repository<Candidate>> = Arc::new(store.clone());
            let rfps: Arc<dyn Repository<Rfp>> = Arc::new(store);
            (cvs, rfps)
        }
        None => {
            info!("DATABASE_URL not set; using in-memory storage");
            let cvs: Arc<dyn Repository<Candidate>> = Arc::new(InMemoryStore::<Candidate>::new());
            let rfps: Arc<dyn Repository<Rfp>> = Arc::new(InMemoryStore::<Rfp>::new());
            (cvs, rfps)
        }
    };

    // Assistant for re-analysis and pitches
    let assistant: Arc<dyn Assistant> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM assistant initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmAssistant(llm))
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; assistant endpoints will return 503");
            Arc::new(UnconfiguredAssistant)
        }
    };

    let defaults = &config.match_defaults;
    info!(
        "Default match settings: threshold={} max_results={} keyword_weight={} content_weight={}",
        defaults.threshold, defaults.max_results, defaults.keyword_weight, defaults.content_weight
    );

    // Build app state
    let state = AppState {
        cvs,
        rfps,
        history: Arc::new(MatchHistory::new(config.history_limit)),
        assistant,
        config: config.clone(),
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
