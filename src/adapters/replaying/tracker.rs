//! Replaying adapter for the `TrackerClient` port.
//!
//! Serves a recorded issue snapshot from a YAML file instead of the
//! network, for offline runs and deterministic end-to-end tests.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::tracker::{FetchFuture, IssueFetch, RemoteIssue, TrackerClient, TransportError};

/// A recorded remote snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Label for the recording.
    pub name: String,
    /// When the snapshot was recorded.
    pub recorded_at: DateTime<Utc>,
    /// The issues the tracker returned.
    #[serde(default)]
    pub issues: Vec<RemoteIssue>,
}

/// Tracker client that replays a recorded snapshot file.
///
/// The filter argument is ignored: the snapshot already reflects whatever
/// query produced it.
pub struct ReplayingTrackerClient {
    path: PathBuf,
}

impl ReplayingTrackerClient {
    /// Creates a client that will replay the snapshot at the given path.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    fn load(&self) -> Result<Snapshot, TransportError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            TransportError::Request(format!(
                "failed to read snapshot {}: {e}",
                self.path.display()
            ))
        })?;
        serde_yaml::from_str(&content).map_err(|e| {
            TransportError::InvalidBody(format!("snapshot {}: {e}", self.path.display()))
        })
    }
}

impl TrackerClient for ReplayingTrackerClient {
    fn fetch_issues(&self, _filter: &str) -> FetchFuture<'_> {
        let loaded = self.load();
        Box::pin(async move {
            let snapshot = loaded?;
            let total = snapshot.issues.len() as u64;
            Ok(IssueFetch { issues: snapshot.issues, total, malformed: 0 })
        })
    }
}
