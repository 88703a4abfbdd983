//! The sync core: pure reconciliation plus the action executor.

pub mod execute;
pub mod reconcile;

pub use execute::{execute, format_outcomes, format_plan, ActionOutcome};
pub use reconcile::{reconcile, Action, ActionPlan, DataIntegrityWarning, Reconciliation};
