//! Coordinator-owned state

mod cell;
mod filter_signal;
mod patch;
mod snapshot_store;

pub use cell::StateCell;
pub use filter_signal::FilterSignal;
pub use patch::SnapshotPatch;
pub use snapshot_store::SnapshotStore;
