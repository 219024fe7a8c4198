//! Axum route handlers for the extraction API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::structured::{extract_structured_info, ExtractMode, ExtractSource};
use crate::state::AppState;

/// POST /api/v1/extract
///
/// Multipart form: optional `file` part, optional `url` text field, and a
/// `mode` text field ("grant" | "project", defaulting to grant). Returns the
/// extracted mapping as JSON; grant mode also persists the grant record.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Map<String, Value>>, AppError> {
    let mut upload: Option<ExtractSource> = None;
    let mut url: Option<String> = None;
    let mut mode = ExtractMode::Grant;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Input(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("upload.txt")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Input(format!("could not read uploaded file: {e}")))?;
                upload = Some(ExtractSource::Upload { filename, bytes });
            }
            Some("url") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Input(format!("could not read url field: {e}")))?;
                // A blank url field (common when the form also has a file
                // input) counts as absent.
                if !value.trim().is_empty() {
                    url = Some(value.trim().to_string());
                }
            }
            Some("mode") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Input(format!("could not read mode field: {e}")))?;
                mode = ExtractMode::parse(&value);
            }
            _ => {}
        }
    }

    info!("Extraction request: mode={mode:?}, file={}, url={}",
        upload.is_some(),
        url.is_some()
    );

    // A file upload wins over a url when both are supplied.
    let source = upload.or(url.map(ExtractSource::Url));

    let fields =
        extract_structured_info(&state.db, &state.llm, &state.http, source, mode).await?;

    Ok(Json(fields))
}
