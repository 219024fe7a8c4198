//! Axum route handler for eligibility scoring.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::eligibility::scorer::EligibilityVerdict;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EligibilityRequest {
    #[serde(default)]
    pub grant: Value,
    #[serde(default)]
    pub project: Value,
}

/// POST /api/v1/eligibility
///
/// Takes the two extracted mappings and returns the scored verdict.
/// Nothing is persisted until the caller confirms the match.
pub async fn handle_eligibility(
    State(state): State<AppState>,
    Json(request): Json<EligibilityRequest>,
) -> Result<Json<EligibilityVerdict>, AppError> {
    let verdict = state.scorer.score(&request.grant, &request.project).await?;
    Ok(Json(verdict))
}
