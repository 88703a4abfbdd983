//! Document store port for local task documents.

use std::path::PathBuf;

use thiserror::Error;

/// Which collection a task document lives in.
///
/// The collection determines the task's lifecycle status, so the same enum
/// serves as listing scope, move destination, and task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The task is open work.
    Open,
    /// The task has been closed.
    Closed,
}

/// A local task document as seen by reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTask {
    /// Store-relative path, unique within the store.
    pub path: String,
    /// Tracker key linking this task to a remote issue, if any.
    ///
    /// Tasks without a key are invisible to reconciliation.
    pub tracker_key: Option<String>,
    /// One-line task summary.
    pub summary: String,
    /// Which collection the task currently lives in.
    pub status: TaskStatus,
}

/// A single document-store operation failed.
///
/// Recorded against the one action that caused it; never aborts the rest
/// of an action plan.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document exists at the given path.
    #[error("task not found: {0}")]
    NotFound(String),
    /// A document already exists at the target path.
    #[error("task already exists: {0}")]
    AlreadyExists(String),
    /// The document content carries no tracker key to derive a name from.
    #[error("document has no tracker key")]
    MissingKey,
    /// An underlying I/O failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The filesystem path the operation touched.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Stores local task documents.
///
/// The core never reads or writes document content except through this
/// boundary, which keeps the sync pipeline testable against in-memory
/// stores.
pub trait DocumentStore: Send + Sync {
    /// Lists the task documents in the given collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read.
    fn list_tasks(&self, scope: TaskStatus) -> Result<Vec<LocalTask>, StoreError>;

    /// Moves a task document into the given collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be found or moved.
    fn move_task(&self, path: &str, destination: TaskStatus) -> Result<(), StoreError>;

    /// Creates a new open task document and returns its store-relative path.
    ///
    /// The document name is derived from the tracker key in the content's
    /// frontmatter.
    ///
    /// # Errors
    ///
    /// Returns an error on a path collision, content without a tracker
    /// key, or a write failure.
    fn create_task(&self, content: &str) -> Result<String, StoreError>;

    /// Overwrites an existing task document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not exist or cannot be
    /// written.
    fn update_task(&self, path: &str, content: &str) -> Result<(), StoreError>;
}
