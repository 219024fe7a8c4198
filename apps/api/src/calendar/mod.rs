/// Calendar collaborator — creates deadline reminder events on a Google
/// Calendar. Treated as an opaque external service: one call, one event.
use chrono::{Duration, NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

pub mod handlers;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
/// Events are created in the deployment's local timezone.
const TIME_ZONE: &str = "Asia/Singapore";
const EVENT_DURATION_HOURS: i64 = 1;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid due date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("calendar is not configured: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("calendar API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
}

/// Client for the destination calendar. Credentials are optional at
/// construction and checked on use.
#[derive(Clone)]
pub struct CalendarClient {
    client: Client,
    calendar_id: Option<String>,
    api_token: Option<String>,
}

impl CalendarClient {
    pub fn new(calendar_id: Option<String>, api_token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            calendar_id,
            api_token,
        }
    }

    /// Creates a one-hour event starting on the due date.
    pub async fn create_event(
        &self,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<CreatedEvent, CalendarError> {
        let calendar_id = self
            .calendar_id
            .as_deref()
            .ok_or_else(|| CalendarError::Config("CALENDAR_ID is not set".to_string()))?;
        let api_token = self
            .api_token
            .as_deref()
            .ok_or_else(|| CalendarError::Config("CALENDAR_API_TOKEN is not set".to_string()))?;

        let start = parse_due_date(due_date)?;
        let end = start + Duration::hours(EVENT_DURATION_HOURS);

        let body = json!({
            "summary": title,
            "description": description,
            "start": {
                "dateTime": start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "timeZone": TIME_ZONE,
            },
            "end": {
                "dateTime": end.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "timeZone": TIME_ZONE,
            },
        });

        let url = format!("{CALENDAR_API_BASE}/calendars/{calendar_id}/events");
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CalendarError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let event: CreatedEvent = response.json().await?;
        info!("Created calendar event {}", event.id);
        Ok(event)
    }
}

fn parse_due_date(due_date: &str) -> Result<NaiveDateTime, CalendarError> {
    NaiveDate::parse_from_str(due_date, "%Y-%m-%d")
        .map(|date| date.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
        .map_err(|_| CalendarError::InvalidDate(due_date.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due_date_accepts_iso_dates() {
        let parsed = parse_due_date("2025-06-26").unwrap();
        assert_eq!(parsed.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-06-26T00:00:00");
    }

    #[test]
    fn test_parse_due_date_rejects_other_formats() {
        assert!(matches!(
            parse_due_date("26/06/2025"),
            Err(CalendarError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_due_date("next tuesday"),
            Err(CalendarError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_due_date("2025-13-40"),
            Err(CalendarError::InvalidDate(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_with_config_error() {
        let client = CalendarClient::new(None, None);
        let result = client.create_event("Deadline", "", "2025-06-26").await;
        assert!(matches!(result, Err(CalendarError::Config(_))));
    }

    #[tokio::test]
    async fn test_bad_date_is_rejected_before_any_network_call() {
        let client = CalendarClient::new(
            Some("team@example.com".to_string()),
            Some("token".to_string()),
        );
        let result = client.create_event("Deadline", "", "tomorrow").await;
        assert!(matches!(result, Err(CalendarError::InvalidDate(_))));
    }
}
