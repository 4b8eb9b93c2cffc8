//! Collaborator abstraction trait definition

mod notifier;
mod view_hooks;

pub use notifier::{LogNotifier, Notifier};
pub use view_hooks::{NoopViewHooks, ViewHooks};
