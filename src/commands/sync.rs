//! `tether sync` command.

use std::path::Path;

use crate::config::{TrackerConfig, VaultConfig};
use crate::context::ServiceContext;
use crate::ports::documents::TaskStatus;
use crate::sync::{execute, format_outcomes, format_plan, reconcile};

/// Execute the `sync` command.
///
/// # Errors
///
/// Returns an error string when configuration is incomplete, when the
/// remote fetch fails (in which case no vault mutation is attempted), or
/// when any planned action failed.
pub fn run(dry_run: bool, vault: Option<&Path>, snapshot: Option<&Path>) -> Result<(), String> {
    let vault_config = VaultConfig::resolve(vault);
    let (ctx, filter) = match snapshot {
        Some(path) => (ServiceContext::replaying(path, vault_config), String::new()),
        None => {
            let config = TrackerConfig::from_env()?;
            let filter = config.query_filter.clone();
            (ServiceContext::live(config, vault_config), filter)
        }
    };
    run_with_context(&ctx, &filter, dry_run)
}

/// Run a sync against an already-wired context.
///
/// # Errors
///
/// Returns an error string on fetch failure or when any action failed.
pub fn run_with_context(ctx: &ServiceContext, filter: &str, dry_run: bool) -> Result<(), String> {
    // The remote fetch is the run's single suspension point.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    let fetch = runtime
        .block_on(ctx.tracker.fetch_issues(filter))
        .map_err(|e| format!("sync aborted: {e}"))?;

    if fetch.malformed > 0 {
        eprintln!("warning: dropped {} malformed remote issue record(s)", fetch.malformed);
    }
    println!("Fetched {} of {} remote issues.", fetch.issues.len(), fetch.total);

    let mut local =
        ctx.documents.list_tasks(TaskStatus::Open).map_err(|e| format!("sync aborted: {e}"))?;
    local.extend(
        ctx.documents.list_tasks(TaskStatus::Closed).map_err(|e| format!("sync aborted: {e}"))?,
    );

    let reconciliation = reconcile(&local, &fetch.issues);
    for warning in &reconciliation.warnings {
        eprintln!("warning: {warning}");
    }

    if dry_run {
        println!("Dry run — would perform:");
        println!("{}", format_plan(&reconciliation.plan));
        return Ok(());
    }

    let outcomes = execute(&reconciliation.plan, ctx.documents.as_ref());
    println!("{}", format_outcomes(&outcomes));

    let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
    if failed > 0 {
        return Err(format!("{failed} of {} actions failed", outcomes.len()));
    }
    Ok(())
}
