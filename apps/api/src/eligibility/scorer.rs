//! Eligibility Scorer — heuristic match between a grant and a project.
//!
//! Three independent boolean criteria, unweighted, one point each:
//! timeline token containment, numeric budget comparison, and key-direction
//! overlap. Pure over its two inputs; no persistence here.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

const TOTAL_CRITERIA: u32 = 3;
/// Matches at or above this percentage count as an overall match.
const MATCH_THRESHOLD: u32 = 60;

/// One scored criterion: did it match, and a human-readable note saying why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    #[serde(rename = "match")]
    pub matched: bool,
    pub note: String,
}

impl CriterionResult {
    fn new(matched: bool, note: impl Into<String>) -> Self {
        Self {
            matched,
            note: note.into(),
        }
    }
}

/// Full verdict returned to callers. `other_fields` is display-only context
/// and never contributes to the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub project_name: String,
    pub grant_name: String,
    pub match_percent: u32,
    pub overall_match: bool,
    pub timeline: CriterionResult,
    pub budget: CriterionResult,
    pub key_directions: CriterionResult,
    pub other_fields: Map<String, Value>,
}

/// The scorer trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, grant: &Value, project: &Value) -> Result<EligibilityVerdict, AppError>;
}

/// Default backend: the pure-Rust heuristic. Fast, deterministic, no LLM call.
pub struct HeuristicScorer;

#[async_trait]
impl MatchScorer for HeuristicScorer {
    async fn score(&self, grant: &Value, project: &Value) -> Result<EligibilityVerdict, AppError> {
        Ok(score_eligibility(grant, project))
    }
}

/// Scores a grant/project pair. Both inputs are loose mappings: unknown keys
/// are ignored, missing keys are tolerated and score as non-matches.
pub fn score_eligibility(grant: &Value, project: &Value) -> EligibilityVerdict {
    let mut score = 0u32;

    let timeline = timeline_criterion(
        &text_field(grant, "timeline_condition"),
        &text_field(project, "timeline"),
    );
    if timeline.matched {
        score += 1;
    }

    let budget = budget_criterion(
        &text_field(grant, "budget_policy"),
        &text_field(project, "budget"),
    );
    if budget.matched {
        score += 1;
    }

    let key_directions = directions_criterion(
        &list_field(grant, "key_directions"),
        &list_field(project, "key_directions"),
    );
    if key_directions.matched {
        score += 1;
    }

    let match_percent = percent(score, TOTAL_CRITERIA);

    EligibilityVerdict {
        project_name: named(project, "project_name", "Unnamed Project"),
        grant_name: named(grant, "grant_name", "Unnamed Grant"),
        match_percent,
        overall_match: match_percent >= MATCH_THRESHOLD,
        timeline,
        budget,
        key_directions,
        other_fields: other_fields(grant, project),
    }
}

/// Timeline criterion: any whitespace token of the grant condition appearing
/// as a substring of the project timeline counts as a match. A single shared
/// token is enough; callers see the note, not a guarantee.
fn timeline_criterion(grant_timeline: &str, project_timeline: &str) -> CriterionResult {
    let project_lower = project_timeline.to_lowercase();
    let matched = grant_timeline
        .to_lowercase()
        .split_whitespace()
        .any(|token| project_lower.contains(token));

    if matched {
        CriterionResult::new(true, "Project timeline aligns with grant requirement.")
    } else {
        CriterionResult::new(false, "Project timeline may not align clearly.")
    }
}

/// Budget criterion: compares the first ≥3-digit run on each side. Either
/// side missing a usable number makes the criterion not evaluable: no
/// point, explanatory note.
fn budget_criterion(grant_budget: &str, project_budget: &str) -> CriterionResult {
    let grant_amount = extract_number(grant_budget);
    let project_amount = extract_number(project_budget);

    if grant_amount == 0 || project_amount == 0 {
        return CriterionResult::new(false, "Budget could not be numerically evaluated.");
    }

    if project_amount <= grant_amount {
        CriterionResult::new(
            true,
            format!(
                "Project budget (${project_amount}) is within grant budget (${grant_amount})."
            ),
        )
    } else {
        CriterionResult::new(
            false,
            format!(
                "Project budget (${project_amount}) exceeds grant cap (${grant_amount})."
            ),
        )
    }
}

/// Key-directions criterion: case-insensitive set intersection. The note
/// lists the shared terms in sorted order so identical inputs always produce
/// identical notes.
fn directions_criterion(
    grant_directions: &BTreeSet<String>,
    project_directions: &BTreeSet<String>,
) -> CriterionResult {
    let overlap: Vec<&str> = grant_directions
        .intersection(project_directions)
        .map(String::as_str)
        .collect();

    if overlap.is_empty() {
        CriterionResult::new(false, "No overlapping directions found.")
    } else {
        CriterionResult::new(true, format!("Shared priorities: {}", overlap.join(", ")))
    }
}

/// Pulls the first run of 3 or more consecutive digits out of a budget
/// string, ignoring thousands-separator commas. Returns 0 when no such run
/// exists ("just 12" has no usable amount).
pub fn extract_number(s: &str) -> i64 {
    static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
    let re = DIGIT_RUN.get_or_init(|| Regex::new(r"\d{3,}").expect("static pattern"));

    let cleaned = s.replace(',', "");
    re.find(&cleaned)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

fn percent(score: u32, total: u32) -> u32 {
    // f64::round is half-away-from-zero: 1/3 → 33, 2/3 → 67.
    ((score as f64 / total as f64) * 100.0).round() as u32
}

/// Reads a field as text: strings pass through, structured values are shown
/// in their JSON form, anything missing is empty.
fn text_field(mapping: &Value, key: &str) -> String {
    match mapping.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Reads a field as a lowercased set of strings. Non-array values and
/// non-string elements contribute nothing.
fn list_field(mapping: &Value, key: &str) -> BTreeSet<String> {
    mapping
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default()
}

fn named(mapping: &Value, key: &str, default: &str) -> String {
    match mapping.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Display-only context shown alongside the verdict. Not scored.
fn other_fields(grant: &Value, project: &Value) -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, source) in [
        ("eligible_applicants", grant),
        ("target_beneficiaries", project),
        ("selection_criteria", grant),
        ("justification", project),
    ] {
        fields.insert(
            key.to_string(),
            source.get(key).cloned().unwrap_or(Value::String(String::new())),
        );
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_criteria_met_scores_zero() {
        let grant = json!({
            "grant_name": "Heritage Fund",
            "timeline_condition": "complete within 2024",
            "budget_policy": "generous support",
            "key_directions": ["heritage", "arts"]
        });
        let project = json!({
            "project_name": "Robotics Club",
            "timeline": "ongoing weekly sessions",
            "budget": "tbd",
            "key_directions": ["stem education"]
        });

        let verdict = score_eligibility(&grant, &project);
        assert_eq!(verdict.match_percent, 0);
        assert!(!verdict.overall_match);
        assert!(!verdict.timeline.matched);
        assert!(!verdict.budget.matched);
        assert!(!verdict.key_directions.matched);
    }

    #[test]
    fn test_all_criteria_met_scores_hundred() {
        let grant = json!({
            "timeline_condition": "by december 2025",
            "budget_policy": "up to $10,000 per project",
            "key_directions": ["Elderly Care", "digital inclusion"]
        });
        let project = json!({
            "timeline": "starting december 2025",
            "budget": "SGD 8,500",
            "key_directions": ["elderly care"]
        });

        let verdict = score_eligibility(&grant, &project);
        assert_eq!(verdict.match_percent, 100);
        assert!(verdict.overall_match);
    }

    #[test]
    fn test_exactly_one_criterion_rounds_to_33() {
        let grant = json!({
            "timeline_condition": "by december 2025",
            "key_directions": ["heritage"]
        });
        let project = json!({
            "timeline": "starting december 2025",
            "key_directions": ["stem"]
        });

        let verdict = score_eligibility(&grant, &project);
        assert!(verdict.timeline.matched);
        assert_eq!(verdict.match_percent, 33, "1/3 must round to 33, not 34");
        assert!(!verdict.overall_match);
    }

    #[test]
    fn test_exactly_two_criteria_round_to_67() {
        let grant = json!({
            "timeline_condition": "by december 2025",
            "budget_policy": "$10,000 cap",
            "key_directions": ["heritage"]
        });
        let project = json!({
            "timeline": "starting december 2025",
            "budget": "9,000",
            "key_directions": ["stem"]
        });

        let verdict = score_eligibility(&grant, &project);
        assert_eq!(verdict.match_percent, 67, "2/3 must round to 67, not 66");
        assert!(verdict.overall_match, "67 clears the 60 threshold");
    }

    #[test]
    fn test_extract_number_strips_commas() {
        assert_eq!(extract_number("$12,345"), 12345);
    }

    #[test]
    fn test_extract_number_no_digits() {
        assert_eq!(extract_number("abc"), 0);
    }

    #[test]
    fn test_extract_number_needs_three_consecutive_digits() {
        assert_eq!(extract_number("no digits here, just 12"), 0);
    }

    #[test]
    fn test_extract_number_takes_first_run() {
        assert_eq!(extract_number("between 1,000 and 5,000 dollars"), 1000);
    }

    #[test]
    fn test_budget_not_evaluable_when_grant_side_missing() {
        let result = budget_criterion("funding available", "$5,000");
        assert!(!result.matched);
        assert_eq!(result.note, "Budget could not be numerically evaluated.");
    }

    #[test]
    fn test_budget_not_evaluable_when_project_side_missing() {
        let result = budget_criterion("$10,000 cap", "modest");
        assert!(!result.matched);
        assert_eq!(result.note, "Budget could not be numerically evaluated.");
    }

    #[test]
    fn test_budget_exceeding_cap_is_a_non_match_with_amounts() {
        let result = budget_criterion("up to $5,000", "$7,500 requested");
        assert!(!result.matched);
        assert!(result.note.contains("7500"));
        assert!(result.note.contains("5000"));
        assert!(result.note.contains("exceeds"));
    }

    #[test]
    fn test_budget_at_cap_matches() {
        let result = budget_criterion("$5,000", "$5,000");
        assert!(result.matched);
    }

    #[test]
    fn test_directions_overlap_is_case_insensitive() {
        let grant: BTreeSet<String> = ["elderly care".to_string()].into();
        let project: BTreeSet<String> = ["elderly care".to_string()].into();
        assert!(directions_criterion(&grant, &project).matched);

        // Through the full scorer, with mixed casing on both sides.
        let verdict = score_eligibility(
            &json!({"key_directions": ["Elderly Care"]}),
            &json!({"key_directions": ["elderly care"]}),
        );
        assert!(verdict.key_directions.matched);
    }

    #[test]
    fn test_directions_note_lists_shared_terms_sorted() {
        let verdict = score_eligibility(
            &json!({"key_directions": ["youth", "arts", "heritage"]}),
            &json!({"key_directions": ["heritage", "arts"]}),
        );
        assert_eq!(
            verdict.key_directions.note,
            "Shared priorities: arts, heritage"
        );
    }

    #[test]
    fn test_timeline_token_substring_containment() {
        // "december" from the grant condition is a substring of the project
        // timeline, so this counts as aligned.
        let result = timeline_criterion("by december 2025", "starting december 2025");
        assert!(result.matched);
        assert_eq!(result.note, "Project timeline aligns with grant requirement.");
    }

    #[test]
    fn test_timeline_empty_grant_condition_never_matches() {
        let result = timeline_criterion("", "starting december 2025");
        assert!(!result.matched);
    }

    #[test]
    fn test_missing_names_fall_back_to_placeholders() {
        let verdict = score_eligibility(&json!({}), &json!({}));
        assert_eq!(verdict.grant_name, "Unnamed Grant");
        assert_eq!(verdict.project_name, "Unnamed Project");
    }

    #[test]
    fn test_other_fields_are_passthrough_not_scored() {
        let grant = json!({
            "eligible_applicants": "registered nonprofits",
            "selection_criteria": "community impact"
        });
        let project = json!({
            "target_beneficiaries": "seniors in rental flats",
            "justification": "isolation during the pandemic"
        });

        let verdict = score_eligibility(&grant, &project);
        assert_eq!(
            verdict.other_fields["eligible_applicants"],
            "registered nonprofits"
        );
        assert_eq!(
            verdict.other_fields["target_beneficiaries"],
            "seniors in rental flats"
        );
        assert_eq!(verdict.other_fields["selection_criteria"], "community impact");
        assert_eq!(
            verdict.other_fields["justification"],
            "isolation during the pandemic"
        );
        assert_eq!(verdict.match_percent, 0);
    }

    #[test]
    fn test_verdict_serializes_match_key() {
        let verdict = score_eligibility(&json!({}), &json!({}));
        let rendered = serde_json::to_value(&verdict).unwrap();
        // Callers read `match`, not the Rust-side field name.
        assert!(rendered["timeline"]["match"].is_boolean());
        assert!(rendered["budget"]["note"].is_string());
    }

    #[tokio::test]
    async fn test_heuristic_scorer_backend_agrees_with_pure_function() {
        let grant = json!({"key_directions": ["arts"]});
        let project = json!({"key_directions": ["arts"]});

        let via_trait = HeuristicScorer.score(&grant, &project).await.unwrap();
        let direct = score_eligibility(&grant, &project);
        assert_eq!(via_trait.match_percent, direct.match_percent);
        assert_eq!(via_trait.match_percent, 33);
    }
}
