//! Live adapter for the `TrackerClient` port speaking the Jira agile REST API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::config::TrackerConfig;
use crate::ports::tracker::{FetchFuture, IssueFetch, RemoteIssue, TrackerClient, TransportError};

/// Fields requested for every issue, before configured extras.
const BASE_FIELDS: &[&str] = &["created", "summary"];

/// How much of an error response body to keep for display.
const ERROR_BODY_LIMIT: usize = 200;

/// Live tracker client that calls the Jira agile board API.
pub struct LiveTrackerClient {
    client: Client,
    config: TrackerConfig,
}

impl LiveTrackerClient {
    /// Creates a new live client for the given connection settings.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self { client: Client::new(), config }
    }

    fn board_url(&self) -> String {
        format!(
            "https://{}/rest/agile/1.0/board/{}/issue",
            self.config.host, self.config.board_id
        )
    }

    fn fields_param(&self) -> String {
        let mut fields: Vec<&str> = BASE_FIELDS.to_vec();
        fields.extend(self.config.extra_fields.iter().map(String::as_str));
        fields.join(",")
    }
}

impl TrackerClient for LiveTrackerClient {
    fn fetch_issues(&self, filter: &str) -> FetchFuture<'_> {
        let url = self.board_url();
        let fields = self.fields_param();
        let filter = filter.to_string();

        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .query(&[("jql", filter.as_str()), ("fields", fields.as_str())])
                .header("Accept", "application/json")
                .header("Authorization", &self.config.authorization)
                .header("Cookie", &self.config.session_token)
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            if !status.is_success() {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    message: truncate(&body),
                });
            }

            parse_board_response(&body)
        })
    }
}

/// Top-level response from the board issues endpoint.
#[derive(Deserialize)]
struct BoardResponse {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    issues: Vec<WireIssue>,
}

/// A single issue record on the wire.
#[derive(Deserialize)]
struct WireIssue {
    key: Option<String>,
    fields: Option<WireFields>,
}

/// The `fields` object of an issue record.
#[derive(Deserialize)]
struct WireFields {
    summary: Option<String>,
    created: Option<String>,
    #[serde(flatten)]
    custom: BTreeMap<String, serde_json::Value>,
}

/// Parses a board response body into an [`IssueFetch`].
///
/// Records missing a key, summary, or parseable creation time are dropped
/// and counted rather than failing the whole fetch; an unparseable body
/// fails it.
fn parse_board_response(body: &str) -> Result<IssueFetch, TransportError> {
    let parsed: BoardResponse =
        serde_json::from_str(body).map_err(|e| TransportError::InvalidBody(e.to_string()))?;

    let mut issues = Vec::new();
    let mut malformed = 0;
    for wire in parsed.issues {
        match remote_issue(wire) {
            Some(issue) => issues.push(issue),
            None => malformed += 1,
        }
    }
    Ok(IssueFetch { issues, total: parsed.total, malformed })
}

fn remote_issue(wire: WireIssue) -> Option<RemoteIssue> {
    let key = wire.key?;
    let fields = wire.fields?;
    let summary = fields.summary?;
    let created = parse_created(fields.created.as_deref()?)?;
    let custom_fields = fields
        .custom
        .into_iter()
        .filter(|(name, value)| name.starts_with("customfield_") && !value.is_null())
        .collect();
    Some(RemoteIssue { key, summary, created, custom_fields })
}

/// Parses Jira's `2024-01-02T03:04:05.000+0000` creation format, with
/// RFC 3339 as a fallback.
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|stamp| stamp.with_timezone(&Utc))
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
