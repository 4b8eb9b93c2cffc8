//! Rendering layer hooks

use server_monitor_gateway::{Server, ServerDraft};

/// Callbacks into the rendering layer
///
/// Fired after a save succeeded so the UI can close its creation form and clear
/// it. Both methods default to no-ops; the state machine never depends on them.
pub trait ViewHooks: Send + Sync {
    /// A server was created and prepended to the snapshot.
    fn on_server_saved(&self, server: &Server) {
        let _ = server;
    }

    /// The creation form should be reset to `draft`.
    fn reset_form(&self, draft: ServerDraft) {
        let _ = draft;
    }
}

/// Hooks that ignore every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewHooks;

impl ViewHooks for NoopViewHooks {}
