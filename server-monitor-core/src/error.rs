//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use server_monitor_gateway::TransportError;

/// Core layer error type
///
/// Every variant ends up as the text of a `ViewState::Error`; the coordinator never
/// branches on the variant itself.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Gateway failure (converting from library)
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The backend returned a server the local snapshot does not hold
    #[error("Server {0} is not in the current snapshot")]
    ServerNotInSnapshot(i64),

    /// An operation needs a snapshot but nothing was loaded yet
    #[error("No servers loaded yet")]
    NoSnapshot,

    /// The task driving an action ended without settling it
    #[error("Action '{0}' was abandoned before it settled")]
    ActionAbandoned(String),
}

impl CoreError {
    /// `true` for failures caused by input or missing resources rather than by a bug.
    ///
    /// Expected failures are logged at `warn`, the rest at `error`.
    /// New variants must be classified here too.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NoSnapshot => true,
            Self::Transport(e) => e.is_expected(),
            Self::ServerNotInSnapshot(_) | Self::ActionAbandoned(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
