//! Axum route handler for calendar reminders.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    pub event_id: String,
    pub html_link: Option<String>,
}

/// POST /api/v1/calendar/events
///
/// Creates a deadline reminder on the configured calendar.
pub async fn handle_create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, AppError> {
    if request.title.trim().is_empty() || request.date.trim().is_empty() {
        return Err(AppError::Input("missing title or date".to_string()));
    }

    let event = state
        .calendar
        .create_event(&request.title, &request.description, &request.date)
        .await?;

    Ok(Json(CreateEventResponse {
        event_id: event.id,
        html_link: event.html_link,
    }))
}
