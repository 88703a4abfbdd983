//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (the issue tracker, the document store).
//! Implementations live in `src/adapters/`.

pub mod documents;
pub mod tracker;

pub use documents::{DocumentStore, LocalTask, StoreError, TaskStatus};
pub use tracker::{FetchFuture, IssueFetch, RemoteIssue, TrackerClient, TransportError};
