//! Pure reconciliation engine.
//!
//! Diffs keyed local task documents against a remote issue snapshot and
//! plans the corrective mutations: close tasks whose issue vanished,
//! create tasks for unmatched issues, refresh the rest. No I/O happens
//! here; the planned actions are applied by [`crate::sync::execute`].

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::ports::documents::{LocalTask, TaskStatus};
use crate::ports::tracker::RemoteIssue;

/// A single planned mutation against the document store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move an open task whose issue vanished from the remote snapshot.
    CloseTask {
        /// Store-relative path of the task document.
        path: String,
        /// The tracker key that no longer appears remotely.
        key: String,
    },
    /// Create a document for a remote issue with no local representative.
    CreateTask {
        /// The remote issue to materialize.
        issue: RemoteIssue,
    },
    /// Refresh an existing document from its matching remote issue.
    UpdateTask {
        /// Store-relative path of the task document.
        path: String,
        /// The matching remote issue.
        issue: RemoteIssue,
    },
}

/// Ordered mutation plan: all closes, then all creates, then all updates.
///
/// The three groups touch disjoint key sets, so no action ever observes a
/// state mutated by a sibling of a different kind within the same run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionPlan {
    /// Planned actions in execution order.
    pub actions: Vec<Action>,
}

impl ActionPlan {
    /// Number of planned actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// `true` when the plan contains no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Local or remote state the engine had to work around.
///
/// Warnings never abort a run; the affected keys are excluded from the
/// computations they would corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityWarning {
    /// Two or more local tasks claim the same tracker key.
    #[error("duplicate tracker key {key} claimed by local tasks {paths:?}")]
    DuplicateTrackerKey {
        /// The contested key.
        key: String,
        /// Paths of every claimant, sorted.
        paths: Vec<String>,
    },
    /// The tracker returned more than one issue with the same key.
    #[error("tracker returned duplicate issue key {key}")]
    DuplicateRemoteKey {
        /// The duplicated key.
        key: String,
    },
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reconciliation {
    /// The ordered action plan.
    pub plan: ActionPlan,
    /// Data-integrity problems noticed while diffing.
    pub warnings: Vec<DataIntegrityWarning>,
}

/// Diffs local tasks against remote issues and plans corrective actions.
///
/// Pure function of its two inputs: no I/O, deterministic output. Actions
/// within each group are ordered by key, ascending, so identical snapshots
/// always produce identical plans.
#[must_use]
pub fn reconcile(local_tasks: &[LocalTask], remote_issues: &[RemoteIssue]) -> Reconciliation {
    let mut warnings = Vec::new();

    // Remote issues by key; the tracker promises uniqueness, so a repeat
    // is only warned about and the first occurrence wins.
    let mut remote: BTreeMap<&str, &RemoteIssue> = BTreeMap::new();
    for issue in remote_issues {
        if remote.contains_key(issue.key.as_str()) {
            warnings.push(DataIntegrityWarning::DuplicateRemoteKey { key: issue.key.clone() });
        } else {
            remote.insert(issue.key.as_str(), issue);
        }
    }

    // Keyed local tasks by key. A key claimed by more than one document is
    // ambiguous: it is excluded from the close computation, and the update
    // pairing falls back to the lexicographically first path.
    let mut local: BTreeMap<&str, Vec<&LocalTask>> = BTreeMap::new();
    for task in local_tasks {
        if let Some(key) = &task.tracker_key {
            local.entry(key.as_str()).or_default().push(task);
        }
    }
    let mut ambiguous: BTreeSet<&str> = BTreeSet::new();
    for (key, claimants) in &mut local {
        if claimants.len() > 1 {
            claimants.sort_by(|a, b| a.path.cmp(&b.path));
            ambiguous.insert(*key);
            warnings.push(DataIntegrityWarning::DuplicateTrackerKey {
                key: (*key).to_string(),
                paths: claimants.iter().map(|task| task.path.clone()).collect(),
            });
        }
    }

    let mut actions = Vec::new();

    // Close: open tasks whose key vanished from the remote snapshot.
    for (key, claimants) in &local {
        if remote.contains_key(key) || ambiguous.contains(key) {
            continue;
        }
        for task in claimants {
            if task.status == TaskStatus::Open {
                actions.push(Action::CloseTask {
                    path: task.path.clone(),
                    key: (*key).to_string(),
                });
            }
        }
    }

    // Create: remote issues with no local representative in either collection.
    for (key, issue) in &remote {
        if !local.contains_key(key) {
            actions.push(Action::CreateTask { issue: (*issue).clone() });
        }
    }

    // Update: remote issues with a matching local document. No-op updates
    // are planned too; hiding them is not this function's call.
    for (key, issue) in &remote {
        if let Some(claimants) = local.get(key) {
            if let Some(task) = claimants.first() {
                actions.push(Action::UpdateTask {
                    path: task.path.clone(),
                    issue: (*issue).clone(),
                });
            }
        }
    }

    Reconciliation { plan: ActionPlan { actions }, warnings }
}
