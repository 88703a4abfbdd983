//! Tracker client port for fetching remote issues.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed future type alias used by [`TrackerClient`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<IssueFetch, TransportError>> + Send + 'a>>;

/// A single issue as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteIssue {
    /// Stable tracker identifier (e.g. `"PROJ-42"`).
    pub key: String,
    /// One-line issue summary.
    pub summary: String,
    /// Tracker-side creation time.
    pub created: DateTime<Utc>,
    /// Custom field values keyed by tracker field id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

/// The result of one fetch against the tracker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueFetch {
    /// Issues the tracker returned, in response order.
    pub issues: Vec<RemoteIssue>,
    /// Total matching-issue count reported by the tracker.
    pub total: u64,
    /// Remote records dropped for missing or unparseable mandatory fields.
    pub malformed: usize,
}

/// Errors from the tracker boundary.
///
/// Any of these aborts the whole run before a plan is computed: an
/// incomplete remote snapshot would corrupt the diff itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a usable response.
    #[error("tracker request failed: {0}")]
    Request(String),
    /// The tracker answered with a non-2xx status.
    #[error("tracker returned HTTP {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, truncated for display.
        message: String,
    },
    /// The response body could not be parsed.
    #[error("could not parse tracker response: {0}")]
    InvalidBody(String),
}

/// Fetches issues from an external tracker.
///
/// Abstracting the tracker allows snapshot replay and testing without a
/// real tracker API.
pub trait TrackerClient: Send + Sync {
    /// Fetches all issues matching the given filter query.
    ///
    /// # Errors
    ///
    /// The future resolves to a [`TransportError`] if the request fails,
    /// the tracker answers with a non-2xx status, or the response body
    /// cannot be parsed.
    fn fetch_issues(&self, filter: &str) -> FetchFuture<'_>;
}
