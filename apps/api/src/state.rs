use std::sync::Arc;

use sqlx::PgPool;

use crate::calendar::CalendarClient;
use crate::eligibility::scorer::MatchScorer;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every external collaborator is constructed once in `main`
/// and passed in here; no module holds global client state.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub calendar: CalendarClient,
    /// Client for fetching remote grant pages, with the short fetch timeout.
    pub http: reqwest::Client,
    /// Pluggable eligibility scorer. Default: HeuristicScorer.
    pub scorer: Arc<dyn MatchScorer>,
}
