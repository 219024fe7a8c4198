mod answers;
mod calendar;
mod config;
mod db;
mod eligibility;
mod errors;
mod extraction;
mod llm_client;
mod matches;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::calendar::CalendarClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::eligibility::scorer::HeuristicScorer;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GrantPal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (pool + migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout_secs);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize calendar client (credentials optional, checked on use)
    let calendar = CalendarClient::new(
        config.calendar_id.clone(),
        config.calendar_api_token.clone(),
    );
    if config.calendar_id.is_none() {
        info!("No CALENDAR_ID configured; calendar endpoint will return CONFIG_ERROR");
    }

    // Client for remote page fetches, with the short fetch timeout
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
        .build()?;

    // Default eligibility scorer backend
    let scorer = Arc::new(HeuristicScorer);

    // Build app state
    let state = AppState {
        db,
        llm,
        calendar,
        http,
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the frontend is served cross-origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
