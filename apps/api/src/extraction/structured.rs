//! Structured-Info Extractor — one LLM call from plain text to a
//! fixed-schema mapping, persisting the grant record as a side effect in
//! grant mode.

use bytes::Bytes;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extraction::prompts::{
    EXTRACT_SYSTEM, GRANT_EXTRACT_PROMPT_TEMPLATE, PROJECT_EXTRACT_PROMPT_TEMPLATE,
};
use crate::extraction::text::{
    extract_text_from_upload, fetch_page_text, truncate_chars, MAX_TEXT_CHARS,
};
use crate::llm_client::LlmClient;
use crate::matches::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    Grant,
    Project,
}

impl ExtractMode {
    /// Anything other than "project" extracts as a grant; the mode field
    /// defaults rather than failing.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("project") {
            ExtractMode::Project
        } else {
            ExtractMode::Grant
        }
    }

    fn prompt_template(self) -> &'static str {
        match self {
            ExtractMode::Grant => GRANT_EXTRACT_PROMPT_TEMPLATE,
            ExtractMode::Project => PROJECT_EXTRACT_PROMPT_TEMPLATE,
        }
    }
}

/// The raw input to an extraction: an uploaded file or a page to fetch.
pub enum ExtractSource {
    Upload { filename: String, bytes: Bytes },
    Url(String),
}

/// Runs the full extraction pipeline: obtain text, truncate, prompt the LLM,
/// recover the embedded JSON object, and (grant mode only) persist the
/// serialized grant record before returning the mapping.
pub async fn extract_structured_info(
    db: &PgPool,
    llm: &LlmClient,
    http: &reqwest::Client,
    source: Option<ExtractSource>,
    mode: ExtractMode,
) -> Result<Map<String, Value>, AppError> {
    let source = source.ok_or_else(|| AppError::Input("no file or url provided".to_string()))?;

    let (text, source_url) = match source {
        ExtractSource::Upload { filename, bytes } => {
            (extract_text_from_upload(&filename, &bytes)?, String::new())
        }
        ExtractSource::Url(url) => (fetch_page_text(http, &url).await?, url),
    };

    debug!("Extracted {} characters of raw text", text.chars().count());
    let text = truncate_chars(&text, MAX_TEXT_CHARS);

    let prompt = mode.prompt_template().replace("{text}", text);
    let parsed: Value = llm.call_json(&prompt, EXTRACT_SYSTEM).await?;

    let fields = match parsed {
        Value::Object(map) => map,
        other => {
            return Err(AppError::Extraction(format!(
                "LLM reply was not a JSON object (got {})",
                json_type_name(&other)
            )))
        }
    };

    if mode == ExtractMode::Grant {
        let grant_id = store::insert_grant(
            db,
            &field_as_text(&fields, "grant_name", "Unnamed Grant"),
            &field_as_text(&fields, "timeline_condition", ""),
            &field_as_text(&fields, "eligible_applicants", ""),
            &field_as_text(&fields, "budget_policy", ""),
            &source_url,
        )
        .await?;
        info!("Stored extracted grant as id {grant_id}");
    }

    Ok(fields)
}

/// Serializes an extracted field to the scalar string the persistence
/// gateway accepts: strings pass through, arrays and objects become their
/// JSON text, a missing key becomes the default.
fn field_as_text(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key) {
        None => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_mode_parse_defaults_to_grant() {
        assert_eq!(ExtractMode::parse("grant"), ExtractMode::Grant);
        assert_eq!(ExtractMode::parse(""), ExtractMode::Grant);
        assert_eq!(ExtractMode::parse("something-else"), ExtractMode::Grant);
        assert_eq!(ExtractMode::parse("project"), ExtractMode::Project);
        assert_eq!(ExtractMode::parse(" Project "), ExtractMode::Project);
    }

    #[test]
    fn test_field_as_text_passes_strings_through() {
        let f = fields(json!({"grant_name": "Silver Upgrade Fund"}));
        assert_eq!(
            field_as_text(&f, "grant_name", "Unnamed Grant"),
            "Silver Upgrade Fund"
        );
    }

    #[test]
    fn test_field_as_text_serializes_lists_to_json() {
        let f = fields(json!({"eligible_applicants": ["nonprofits", "students"]}));
        assert_eq!(
            field_as_text(&f, "eligible_applicants", ""),
            r#"["nonprofits","students"]"#
        );
    }

    #[test]
    fn test_field_as_text_serializes_objects_to_json() {
        let f = fields(json!({"budget_policy": {"cap": 5000}}));
        assert_eq!(field_as_text(&f, "budget_policy", ""), r#"{"cap":5000}"#);
    }

    #[test]
    fn test_field_as_text_missing_key_uses_default() {
        let f = fields(json!({}));
        assert_eq!(field_as_text(&f, "grant_name", "Unnamed Grant"), "Unnamed Grant");
        assert_eq!(field_as_text(&f, "timeline_condition", ""), "");
    }

    #[test]
    fn test_grant_prompt_names_every_contract_key() {
        for key in [
            "grant_name",
            "grant_description",
            "timeline_condition",
            "eligible_applicants",
            "budget_policy",
            "key_directions",
            "expenses_allowed",
            "expenses_disallowed",
            "selection_criteria",
            "supporting_documents_required",
        ] {
            assert!(
                GRANT_EXTRACT_PROMPT_TEMPLATE.contains(key),
                "grant prompt is missing key '{key}'"
            );
        }
    }

    #[test]
    fn test_project_prompt_names_every_contract_key() {
        for key in [
            "project_name",
            "project_description",
            "timeline",
            "budget",
            "key_objectives",
            "key_directions",
            "target_beneficiaries",
            "volunteer_roles",
            "partnerships",
            "justification",
            "evaluation_methods",
        ] {
            assert!(
                PROJECT_EXTRACT_PROMPT_TEMPLATE.contains(key),
                "project prompt is missing key '{key}'"
            );
        }
    }
}
