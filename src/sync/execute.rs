//! Applies an action plan against the document store.
//!
//! Actions run strictly in plan order, one store mutation per successful
//! action. A failure is recorded against its action and the rest of the
//! plan still runs; aborting halfway would leave the vault in a state no
//! caller could reason about.

use std::fmt::Write as _;

use crate::note;
use crate::ports::documents::{DocumentStore, StoreError, TaskStatus};
use crate::sync::reconcile::{Action, ActionPlan};

/// Outcome of applying a single planned action.
#[derive(Debug)]
pub struct ActionOutcome {
    /// The action that was attempted.
    pub action: Action,
    /// Whether the document store accepted it.
    pub result: Result<(), StoreError>,
}

impl ActionOutcome {
    /// `true` when the action succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Applies the plan in order, recording one outcome per action.
///
/// The executor only ever talks to the document store; the remote
/// snapshot was consumed when the plan was computed, and no action may
/// trigger a second fetch.
pub fn execute(plan: &ActionPlan, store: &dyn DocumentStore) -> Vec<ActionOutcome> {
    plan.actions
        .iter()
        .map(|action| ActionOutcome { action: action.clone(), result: apply(action, store) })
        .collect()
}

fn apply(action: &Action, store: &dyn DocumentStore) -> Result<(), StoreError> {
    match action {
        Action::CloseTask { path, .. } => store.move_task(path, TaskStatus::Closed),
        Action::CreateTask { issue } => store.create_task(&note::render_task(issue)).map(|_| ()),
        Action::UpdateTask { path, issue } => store.update_task(path, &note::render_task(issue)),
    }
}

/// Formats a plan as a human-readable dry-run listing.
#[must_use]
pub fn format_plan(plan: &ActionPlan) -> String {
    if plan.is_empty() {
        return "Nothing to sync.".to_string();
    }
    let lines: Vec<String> = plan
        .actions
        .iter()
        .map(|action| match action {
            Action::CloseTask { path, key } => format!("  CLOSE  {key}: {path}"),
            Action::CreateTask { issue } => format!("  CREATE {}: {}", issue.key, issue.summary),
            Action::UpdateTask { path, issue } => format!("  UPDATE {}: {path}", issue.key),
        })
        .collect();
    lines.join("\n")
}

/// Formats executed outcomes as a sync report.
///
/// A partial-failure run reads "Synced N of M actions" with every failing
/// action enumerated; failures are never silently swallowed.
#[must_use]
pub fn format_outcomes(outcomes: &[ActionOutcome]) -> String {
    if outcomes.is_empty() {
        return "Nothing to sync.".to_string();
    }
    let synced = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let mut report = format!("Synced {synced} of {} actions.", outcomes.len());
    for outcome in outcomes {
        if let Err(reason) = &outcome.result {
            let _ = write!(report, "\n  FAILED {}: {reason}", describe(&outcome.action));
        }
    }
    report
}

fn describe(action: &Action) -> String {
    match action {
        Action::CloseTask { path, key } => format!("close {key} ({path})"),
        Action::CreateTask { issue } => format!("create {}", issue.key),
        Action::UpdateTask { path, issue } => format!("update {} ({path})", issue.key),
    }
}
