pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::answers;
use crate::calendar;
use crate::eligibility;
use crate::extraction;
use crate::matches;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction: document/page → structured mapping
        .route("/api/v1/extract", post(extraction::handlers::handle_extract))
        // Eligibility: grant + project mappings → scored verdict
        .route(
            "/api/v1/eligibility",
            post(eligibility::handlers::handle_eligibility),
        )
        // Matches: confirm a scored pair, list the joined history
        .route(
            "/api/v1/matches",
            get(matches::handlers::handle_list_matches)
                .post(matches::handlers::handle_confirm_match),
        )
        // Answers: draft application answers from a proposal
        .route(
            "/api/v1/answers/generate",
            post(answers::handlers::handle_generate),
        )
        .route(
            "/api/v1/answers/regenerate",
            post(answers::handlers::handle_regenerate),
        )
        // Calendar: deadline reminders
        .route(
            "/api/v1/calendar/events",
            post(calendar::handlers::handle_create_event),
        )
        .with_state(state)
}
