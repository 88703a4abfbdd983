//! Service context bundling the port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveTrackerClient, VaultStore};
use crate::adapters::replaying::ReplayingTrackerClient;
use crate::config::{TrackerConfig, VaultConfig};
use crate::ports::documents::DocumentStore;
use crate::ports::tracker::TrackerClient;

/// Bundles the two boundaries a sync run needs.
///
/// Constructors wire up different adapter combinations; the sync pipeline
/// itself never knows which one it is talking to.
pub struct ServiceContext {
    /// Remote tracker boundary.
    pub tracker: Box<dyn TrackerClient>,
    /// Local document store boundary.
    pub documents: Box<dyn DocumentStore>,
}

impl ServiceContext {
    /// Creates a live context: HTTP tracker client and vault-backed store.
    #[must_use]
    pub fn live(tracker: TrackerConfig, vault: VaultConfig) -> Self {
        Self {
            tracker: Box::new(LiveTrackerClient::new(tracker)),
            documents: Box::new(VaultStore::new(vault)),
        }
    }

    /// Creates a context that replays a recorded snapshot instead of
    /// fetching, still against the real vault store.
    #[must_use]
    pub fn replaying(snapshot: &Path, vault: VaultConfig) -> Self {
        Self {
            tracker: Box::new(ReplayingTrackerClient::new(snapshot)),
            documents: Box::new(VaultStore::new(vault)),
        }
    }
}
