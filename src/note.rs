//! Task document format: YAML frontmatter plus a markdown body.
//!
//! Every tracker-linked document carries a `trackerKey` frontmatter field;
//! documents without one are ordinary notes and stay invisible to sync.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::tracker::RemoteIssue;

const FENCE: &str = "---";

/// Structured header of a task document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Frontmatter {
    /// Tracker key linking the document to a remote issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_key: Option<String>,
    /// One-line summary mirrored from the tracker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Tracker-side creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Splits a document into its frontmatter and body.
///
/// Absent or malformed frontmatter yields an empty [`Frontmatter`]; the
/// document is then simply a note without a tracker key.
#[must_use]
pub fn parse(content: &str) -> (Frontmatter, &str) {
    let Some(rest) = content.strip_prefix(FENCE).and_then(|r| r.strip_prefix('\n')) else {
        return (Frontmatter::default(), content);
    };
    let Some(end) = rest.find("\n---") else {
        return (Frontmatter::default(), content);
    };
    let header = &rest[..end];
    let body = rest[end + 4..].trim_start_matches('\n');
    let frontmatter = serde_yaml::from_str(header).unwrap_or_default();
    (frontmatter, body)
}

/// Synthesizes a full task document from a remote issue.
///
/// Parsing the result yields the issue's key back, which is what lets the
/// document store derive a file name from created content.
#[must_use]
pub fn render_task(issue: &RemoteIssue) -> String {
    let frontmatter = Frontmatter {
        tracker_key: Some(issue.key.clone()),
        summary: Some(issue.summary.clone()),
        created: Some(issue.created),
    };
    // serde_yaml cannot fail on this struct; fall back to an empty header.
    let header = serde_yaml::to_string(&frontmatter).unwrap_or_default();

    let mut doc = format!("{FENCE}\n{header}{FENCE}\n\n# {}\n", issue.summary);
    let _ = writeln!(doc, "\nTracker issue {} created {}.", issue.key, issue.created.to_rfc3339());

    if !issue.custom_fields.is_empty() {
        doc.push_str("\n## Tracker fields\n\n");
        for (field, value) in &issue.custom_fields {
            let rendered = match value.as_str() {
                Some(text) => text.to_string(),
                None => value.to_string(),
            };
            let _ = writeln!(doc, "- {field}: {rendered}");
        }
    }

    doc
}
