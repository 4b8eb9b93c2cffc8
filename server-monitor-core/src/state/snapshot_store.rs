//! Snapshot store

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use server_monitor_gateway::Envelope;
use tokio::sync::watch;

use super::StateCell;

/// Last known good server collection.
///
/// Written only by the coordinator. A stored envelope is never mutated; every
/// replacement publishes a new `Arc` and bumps [`version`](Self::version).
#[derive(Debug, Default)]
pub struct SnapshotStore {
    cell: StateCell<Option<Arc<Envelope>>>,
    version: AtomicU64,
}

impl SnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, `None` until the first successful read.
    pub fn current(&self) -> Option<Arc<Envelope>> {
        self.cell.current()
    }

    /// Stores `envelope` as the new snapshot and returns the shared copy.
    pub fn replace(&self, envelope: Envelope) -> Arc<Envelope> {
        let stored = Arc::new(envelope);
        self.cell.set(Some(Arc::clone(&stored)));
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!(
            "Snapshot v{version} stored ({} servers)",
            stored.servers().map_or(0, <[_]>::len)
        );
        stored
    }

    /// Number of replacements so far. Observability only.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Envelope>>> {
        self.cell.watch()
    }
}
