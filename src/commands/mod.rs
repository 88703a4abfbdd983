//! Command dispatch and handlers.

pub mod status;
pub mod sync;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Sync { dry_run, vault, snapshot } => {
            sync::run(*dry_run, vault.as_deref(), snapshot.as_deref())
        }
        Command::Status { vault } => status::run(vault.as_deref()),
    }
}
