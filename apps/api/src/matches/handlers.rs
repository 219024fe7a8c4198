//! Axum route handlers for the matches API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matches::store::{
    grant_exists, insert_project_with_match, latest_grant, list_matches_joined, NewProjectMatch,
};
use crate::models::grant::MatchSummaryRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfirmMatchRequest {
    pub project_name: String,
    #[serde(default)]
    pub project_timeline: String,
    #[serde(default)]
    pub project_budget: String,
    #[serde(default)]
    pub project_directions: String,
    pub match_percent: i32,
    #[serde(default)]
    pub is_urgent: bool,
    /// Explicit grant to bind the match to. When absent, falls back to the
    /// most recently extracted grant.
    #[serde(default)]
    pub grant_id: Option<i64>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfirmMatchResponse {
    pub grant_id: i64,
    pub project_id: i64,
    pub match_id: i64,
}

/// POST /api/v1/matches
///
/// Persists a confirmed project and its match row in one transaction.
pub async fn handle_confirm_match(
    State(state): State<AppState>,
    Json(request): Json<ConfirmMatchRequest>,
) -> Result<Json<ConfirmMatchResponse>, AppError> {
    if request.project_name.trim().is_empty() {
        return Err(AppError::Input("project_name cannot be empty".to_string()));
    }

    let grant_id = match request.grant_id {
        Some(id) => {
            if !grant_exists(&state.db, id).await? {
                return Err(AppError::NotFound(format!("Grant {id} not found")));
            }
            id
        }
        None => latest_grant(&state.db)
            .await?
            .map(|grant| grant.id)
            .ok_or_else(|| AppError::Input("no grant found in database".to_string()))?,
    };

    let (project_id, match_id) = insert_project_with_match(
        &state.db,
        grant_id,
        NewProjectMatch {
            project_name: &request.project_name,
            project_timeline: &request.project_timeline,
            project_budget: &request.project_budget,
            project_directions: &request.project_directions,
            source_url: request.source_url.as_deref().unwrap_or(""),
            match_score: request.match_percent,
            is_urgent: request.is_urgent,
        },
    )
    .await?;

    Ok(Json(ConfirmMatchResponse {
        grant_id,
        project_id,
        match_id,
    }))
}

/// GET /api/v1/matches
///
/// The joined match listing, newest first.
pub async fn handle_list_matches(
    State(state): State<AppState>,
) -> Result<Json<Vec<MatchSummaryRow>>, AppError> {
    let matches = list_matches_joined(&state.db).await?;
    Ok(Json(matches))
}
