//! View-state machine

use serde::Serialize;
use server_monitor_gateway::Envelope;

/// What the rendering layer should show.
///
/// Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "dataState", content = "appData", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    /// A request is in flight and there is nothing worth showing yet.
    #[default]
    Loading,
    /// A server collection is ready to render.
    Loaded(Envelope),
    /// The last action failed; carries the human-readable message.
    Error(String),
}

impl ViewState {
    /// The loaded envelope, if any.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Self::Loaded(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// How an action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The gateway answered and the snapshot was patched; carries the envelope to render.
    Resolved(Envelope),
    /// Something failed; carries the error text.
    Failed(String),
}

/// Lifecycle of one action: pending, then settled exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPhase {
    Pending(ViewState),
    Settled(ViewState),
}

impl ActionPhase {
    /// Pending phase of an action.
    ///
    /// With an optimistic envelope the previous view stays on screen
    /// (`Loaded`); without one the action shows `Loading`.
    #[must_use]
    pub fn begin(optimistic: Option<Envelope>) -> Self {
        Self::Pending(optimistic.map_or(ViewState::Loading, ViewState::Loaded))
    }

    /// Pure transition function.
    ///
    /// A pending action settles on the first event; a settled action ignores
    /// every later event.
    #[must_use]
    pub fn next(self, event: ViewEvent) -> Self {
        match self {
            Self::Pending(_) => Self::Settled(match event {
                ViewEvent::Resolved(envelope) => ViewState::Loaded(envelope),
                ViewEvent::Failed(message) => ViewState::Error(message),
            }),
            settled @ Self::Settled(_) => settled,
        }
    }

    /// The view-state of this phase.
    pub fn view(&self) -> &ViewState {
        match self {
            Self::Pending(view) | Self::Settled(view) => view,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }
}
