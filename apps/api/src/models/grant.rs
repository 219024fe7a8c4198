use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted grant record. Structured fields from extraction are
/// serialized to their JSON text before insert; every column is a scalar
/// string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GrantRow {
    pub id: i64,
    pub name: String,
    pub timeline: String,
    pub applicants: String,
    pub budget: String,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the joined match listing, newest first. Projects and matches
/// only surface through this join.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchSummaryRow {
    pub match_score: i32,
    pub is_urgent: bool,
    pub grant_name: String,
    pub grant_timeline: String,
    pub grant_budget: String,
    pub project_name: String,
    pub project_timeline: String,
    pub project_budget: String,
}
