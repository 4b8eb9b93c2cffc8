//! Per-action view of the pending → settled transition

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

use crate::error::CoreError;
use crate::types::{ActionPhase, ViewState};

/// Handle returned by every coordinator action.
///
/// Cloning is cheap. Every subscriber observes the pending view-state first and the
/// terminal one second, no matter when it attaches.
#[derive(Debug, Clone)]
pub struct ActionHandle {
    action: &'static str,
    pending: ViewState,
    rx: watch::Receiver<ActionPhase>,
}

impl ActionHandle {
    pub(crate) fn new(
        action: &'static str,
        pending: ViewState,
        rx: watch::Receiver<ActionPhase>,
    ) -> Self {
        Self {
            action,
            pending,
            rx,
        }
    }

    /// Name of the action (`load`, `ping`, ...).
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// View-state published when the action started.
    pub fn pending(&self) -> &ViewState {
        &self.pending
    }

    /// Latest view-state of this action: pending or terminal.
    pub fn current(&self) -> ViewState {
        self.rx.borrow().view().clone()
    }

    pub fn is_settled(&self) -> bool {
        self.rx.borrow().is_settled()
    }

    /// Waits for the terminal view-state.
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.rx.clone();
        let settled = rx
            .wait_for(ActionPhase::is_settled)
            .await
            .map(|phase| phase.view().clone());
        settled.unwrap_or_else(|_| {
            ViewState::Error(CoreError::ActionAbandoned(self.action.to_string()).to_string())
        })
    }

    /// Stream of exactly two items: pending, then terminal.
    ///
    /// Restartable: each call replays from the pending state.
    pub fn subscribe(&self) -> BoxStream<'static, ViewState> {
        let pending = self.pending.clone();
        let handle = self.clone();
        stream::once(async move { pending })
            .chain(stream::once(async move { handle.settled().await }))
            .boxed()
    }
}
