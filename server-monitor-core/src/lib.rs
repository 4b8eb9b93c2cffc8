//! Server Monitor Core Library
//!
//! Client-side state coordination for the server monitor:
//! - Snapshot Store: the last known server collection, patched copy-on-write
//! - Filter Signal and saving flag: replay-last-value cells for row/form state
//! - State Coordinator: maps every action's pending/success/failure onto a [`ViewState`]
//! - Report export of the current snapshot
//!
//! The backend is reached through the [`ServerGateway`](server_monitor_gateway::ServerGateway)
//! trait; notification delivery and rendering callbacks are injected through
//! [`Notifier`] and [`ViewHooks`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use server_monitor_core::{ServiceContext, StateCoordinator};
//! use server_monitor_gateway::HttpServerGateway;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Arc::new(HttpServerGateway::from_env()?);
//!     let coordinator = StateCoordinator::new(Arc::new(ServiceContext::new(gateway)));
//!
//!     let view = coordinator.load().settled().await;
//!     println!("{view:?}");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ActionHandle, ReportService, ServiceContext, StateCoordinator};
pub use state::{FilterSignal, SnapshotPatch, SnapshotStore, StateCell};
pub use traits::{LogNotifier, NoopViewHooks, Notifier, ViewHooks};
pub use types::{ActionPhase, ServerReport, ViewEvent, ViewState};
