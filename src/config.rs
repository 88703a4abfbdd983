//! Tracker connection and vault layout configuration.

use std::path::{Path, PathBuf};

/// Connection settings for the live tracker client.
///
/// All values are opaque strings passed through to the tracker; the only
/// validation is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// `Authorization` header value (e.g. `"Basic ..."`).
    pub authorization: String,
    /// Session cookie header value.
    pub session_token: String,
    /// Tracker host name (e.g. `"myco.atlassian.net"`).
    pub host: String,
    /// Agile board identifier.
    pub board_id: String,
    /// Issue filter query (JQL).
    pub query_filter: String,
    /// Extra custom-field ids appended to the fetch's field list.
    pub extra_fields: Vec<String>,
}

impl TrackerConfig {
    /// Loads the configuration from `TETHER_*` environment variables,
    /// reading a `.env` file first when one is present.
    ///
    /// # Errors
    ///
    /// Returns an error string naming the first missing or empty variable.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through a variable-lookup closure.
    ///
    /// # Errors
    ///
    /// Returns an error string naming the first missing or empty variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(format!("{name} is not set")),
        };
        Ok(Self {
            authorization: required("TETHER_AUTHORIZATION")?,
            session_token: required("TETHER_SESSION_TOKEN")?,
            host: required("TETHER_HOST")?,
            board_id: required("TETHER_BOARD_ID")?,
            query_filter: required("TETHER_JQL")?,
            extra_fields: lookup("TETHER_FIELDS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|field| !field.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

/// Vault directory layout for task documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Root directory of the vault.
    pub root: PathBuf,
    /// Subdirectory holding open task documents.
    pub open_dir: String,
    /// Subdirectory holding closed task documents.
    pub closed_dir: String,
}

impl VaultConfig {
    /// Default open-tasks subdirectory name.
    pub const DEFAULT_OPEN_DIR: &'static str = "Tasks-Open";
    /// Default closed-tasks subdirectory name.
    pub const DEFAULT_CLOSED_DIR: &'static str = "Tasks-Closed";

    /// Creates the default layout rooted at the given directory.
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            open_dir: Self::DEFAULT_OPEN_DIR.to_string(),
            closed_dir: Self::DEFAULT_CLOSED_DIR.to_string(),
        }
    }

    /// Resolves the vault root from the CLI flag, `TETHER_VAULT`, or the
    /// current directory, in that order.
    #[must_use]
    pub fn resolve(flag: Option<&Path>) -> Self {
        let root = flag.map(Path::to_path_buf).unwrap_or_else(|| {
            std::env::var("TETHER_VAULT").map_or_else(|_| PathBuf::from("."), PathBuf::from)
        });
        Self::at(root)
    }
}
