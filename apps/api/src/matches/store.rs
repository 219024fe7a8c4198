//! Persistence gateway. Simple single-statement inserts and fetches; the
//! only multi-statement unit is the project+match pair, which commits
//! atomically. A failure cannot leave an orphan project row.

use sqlx::PgPool;
use tracing::info;

use crate::models::grant::{GrantRow, MatchSummaryRow};

/// Inserts an extracted grant record and returns its id.
pub async fn insert_grant(
    pool: &PgPool,
    name: &str,
    timeline: &str,
    applicants: &str,
    budget: &str,
    source_url: &str,
) -> Result<i64, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO grants (name, timeline, applicants, budget, source_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(timeline)
    .bind(applicants)
    .bind(budget)
    .bind(source_url)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// The most recently inserted grant, if any.
pub async fn latest_grant(pool: &PgPool) -> Result<Option<GrantRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM grants ORDER BY id DESC LIMIT 1")
        .fetch_optional(pool)
        .await
}

pub async fn grant_exists(pool: &PgPool, grant_id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM grants WHERE id = $1")
        .bind(grant_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Parameters for confirming a project against a grant.
pub struct NewProjectMatch<'a> {
    pub project_name: &'a str,
    pub project_timeline: &'a str,
    pub project_budget: &'a str,
    pub project_directions: &'a str,
    pub source_url: &'a str,
    pub match_score: i32,
    pub is_urgent: bool,
}

/// Inserts the confirmed project and its match row against `grant_id` in a
/// single transaction. Returns (project_id, match_id).
pub async fn insert_project_with_match(
    pool: &PgPool,
    grant_id: i64,
    params: NewProjectMatch<'_>,
) -> Result<(i64, i64), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let project_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO projects (name, timeline, budget, directions, source_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(params.project_name)
    .bind(params.project_timeline)
    .bind(params.project_budget)
    .bind(params.project_directions)
    .bind(params.source_url)
    .fetch_one(&mut *tx)
    .await?;

    let match_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO matches (grant_id, project_id, match_score, is_urgent)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(grant_id)
    .bind(project_id)
    .bind(params.match_score)
    .bind(params.is_urgent)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Confirmed project {project_id} against grant {grant_id} (match {match_id})");
    Ok((project_id, match_id))
}

/// All matches joined with their grant and project, newest first.
pub async fn list_matches_joined(pool: &PgPool) -> Result<Vec<MatchSummaryRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT
            m.match_score,
            m.is_urgent,
            g.name AS grant_name,
            g.timeline AS grant_timeline,
            g.budget AS grant_budget,
            p.name AS project_name,
            p.timeline AS project_timeline,
            p.budget AS project_budget
        FROM matches m
        JOIN grants g ON m.grant_id = g.id
        JOIN projects p ON m.project_id = p.id
        ORDER BY m.id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}
