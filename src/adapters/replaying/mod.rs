//! Replaying adapters that serve recorded interactions.

pub mod tracker;

pub use tracker::{ReplayingTrackerClient, Snapshot};
