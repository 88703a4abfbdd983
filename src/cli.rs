//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `tether`.
#[derive(Debug, Parser)]
#[command(name = "tether", version, about = "Reconcile tracker issues with local task notes")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync tracker issues into the vault (close, create, update).
    Sync {
        /// Print the action plan without touching the vault.
        #[arg(long)]
        dry_run: bool,
        /// Vault root (defaults to `TETHER_VAULT` or the current directory).
        #[arg(long)]
        vault: Option<PathBuf>,
        /// Replay a recorded issue snapshot instead of fetching.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Report task counts for the vault.
    Status {
        /// Vault root (defaults to `TETHER_VAULT` or the current directory).
        #[arg(long)]
        vault: Option<PathBuf>,
    },
}
