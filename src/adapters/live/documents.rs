//! Live adapter for the `DocumentStore` port backed by a vault directory.
//!
//! Open and closed tasks are markdown files in two sibling directories
//! under the vault root. Closing a task is a rename between them.

use std::path::{Path, PathBuf};

use crate::config::VaultConfig;
use crate::note;
use crate::ports::documents::{DocumentStore, LocalTask, StoreError, TaskStatus};

/// Vault-backed document store.
pub struct VaultStore {
    config: VaultConfig,
}

impl VaultStore {
    /// Creates a store over the given vault layout.
    #[must_use]
    pub fn new(config: VaultConfig) -> Self {
        Self { config }
    }

    fn scope_name(&self, scope: TaskStatus) -> &str {
        match scope {
            TaskStatus::Open => &self.config.open_dir,
            TaskStatus::Closed => &self.config.closed_dir,
        }
    }

    fn scope_dir(&self, scope: TaskStatus) -> PathBuf {
        self.config.root.join(self.scope_name(scope))
    }

    fn absolute(&self, relative: &str) -> PathBuf {
        self.config.root.join(relative)
    }
}

impl DocumentStore for VaultStore {
    fn list_tasks(&self, scope: TaskStatus) -> Result<Vec<LocalTask>, StoreError> {
        let dir = self.scope_dir(scope);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| io_err(&dir, e))?;
        let mut tasks = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&dir, e))?;
            let file_path = entry.path();
            if file_path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(name) = file_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let content =
                std::fs::read_to_string(&file_path).map_err(|e| io_err(&file_path, e))?;
            let (frontmatter, _) = note::parse(&content);

            let stem = name.strip_suffix(".md").unwrap_or(name);
            tasks.push(LocalTask {
                path: format!("{}/{name}", self.scope_name(scope)),
                tracker_key: frontmatter.tracker_key,
                summary: frontmatter.summary.unwrap_or_else(|| stem.to_string()),
                status: scope,
            });
        }
        tasks.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(tasks)
    }

    fn move_task(&self, path: &str, destination: TaskStatus) -> Result<(), StoreError> {
        let source = self.absolute(path);
        if !source.exists() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        let Some(name) = source.file_name() else {
            return Err(StoreError::NotFound(path.to_string()));
        };

        let dest_dir = self.scope_dir(destination);
        std::fs::create_dir_all(&dest_dir).map_err(|e| io_err(&dest_dir, e))?;
        let target = dest_dir.join(name);
        if target.exists() {
            return Err(StoreError::AlreadyExists(format!(
                "{}/{}",
                self.scope_name(destination),
                name.to_string_lossy()
            )));
        }

        std::fs::rename(&source, &target).map_err(|e| io_err(&target, e))
    }

    fn create_task(&self, content: &str) -> Result<String, StoreError> {
        let (frontmatter, _) = note::parse(content);
        let key = frontmatter.tracker_key.ok_or(StoreError::MissingKey)?;
        // Tracker keys are path-safe save for the odd separator.
        let name = format!("{}.md", key.replace(['/', '\\'], "-"));
        let relative = format!("{}/{name}", self.config.open_dir);

        let dir = self.scope_dir(TaskStatus::Open);
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        let target = dir.join(&name);
        if target.exists() {
            return Err(StoreError::AlreadyExists(relative));
        }

        std::fs::write(&target, content).map_err(|e| io_err(&target, e))?;
        Ok(relative)
    }

    fn update_task(&self, path: &str, content: &str) -> Result<(), StoreError> {
        let target = self.absolute(path);
        if !target.exists() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        std::fs::write(&target, content).map_err(|e| io_err(&target, e))
    }
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io { path: path.to_path_buf(), source }
}
