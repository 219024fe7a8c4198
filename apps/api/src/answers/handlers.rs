//! Axum route handlers for the answers API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::answers::generator::{generate_answers, generate_one, AnswerPair};
use crate::errors::AppError;
use crate::extraction::text::extract_text_from_upload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub answers: Vec<AnswerPair>,
    /// The extracted proposal text, echoed back so the client can pass it to
    /// the regenerate endpoint without re-uploading the file.
    pub proposal: String,
}

#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub proposal: String,
}

#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub answer: String,
}

/// POST /api/v1/answers/generate
///
/// Multipart form with two file parts: `questions` (one question per line)
/// and `proposal`. Returns `{question, answer}` pairs in input order.
pub async fn handle_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut questions_text: Option<String> = None;
    let mut proposal_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Input(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("questions") => {
                let filename = field.file_name().unwrap_or("upload.txt").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Input(format!("could not read uploaded questions file: {e}"))
                })?;
                questions_text = Some(extract_text_from_upload(&filename, &bytes)?);
            }
            Some("proposal") => {
                let filename = field.file_name().unwrap_or("upload.txt").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Input(format!("could not read uploaded proposal file: {e}"))
                })?;
                proposal_text = Some(extract_text_from_upload(&filename, &bytes)?);
            }
            _ => {}
        }
    }

    let questions_text = questions_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Input("missing or empty questions file".to_string()))?;
    let proposal_text = proposal_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Input("missing or empty proposal file".to_string()))?;

    let answers = generate_answers(&state.llm, &questions_text, &proposal_text).await?;
    info!("Generated {} answers", answers.len());

    Ok(Json(GenerateResponse {
        answers,
        proposal: proposal_text,
    }))
}

/// POST /api/v1/answers/regenerate
///
/// Re-drafts a single answer from one question/proposal pair.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Json(request): Json<RegenerateRequest>,
) -> Result<Json<RegenerateResponse>, AppError> {
    if request.question.trim().is_empty() || request.proposal.trim().is_empty() {
        return Err(AppError::Input(
            "missing question or proposal".to_string(),
        ));
    }

    let answer = generate_one(&state.llm, &request.question, &request.proposal).await?;
    Ok(Json(RegenerateResponse { answer }))
}
