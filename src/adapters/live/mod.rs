//! Live adapters for real external interactions.

pub mod documents;
pub mod tracker;

pub use documents::VaultStore;
pub use tracker::LiveTrackerClient;
