//! `tether status` command.

use std::path::Path;

use crate::adapters::live::VaultStore;
use crate::config::VaultConfig;
use crate::ports::documents::{DocumentStore, TaskStatus};

/// Execute the `status` command.
///
/// # Errors
///
/// Returns an error string if the vault cannot be listed.
pub fn run(vault: Option<&Path>) -> Result<(), String> {
    let store = VaultStore::new(VaultConfig::resolve(vault));
    let open = store.list_tasks(TaskStatus::Open).map_err(|e| e.to_string())?;
    let closed = store.list_tasks(TaskStatus::Closed).map_err(|e| e.to_string())?;

    let linked = open.iter().filter(|task| task.tracker_key.is_some()).count();
    println!("Open tasks: {} ({linked} linked to tracker)", open.len());
    println!("Closed tasks: {}", closed.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_on_an_empty_vault_succeeds() {
        let root = std::env::temp_dir().join("tether_status_cmd_empty");
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        assert!(run(Some(&root)).is_ok());
        let _ = std::fs::remove_dir_all(&root);
    }
}
