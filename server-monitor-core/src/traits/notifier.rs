//! Notification delivery abstract Trait

/// Notification sink
///
/// Receives the success or error text of every settled action. Delivery is
/// fire-and-forget: implementations must not block and cannot report failure.
pub trait Notifier: Send + Sync {
    /// A successful action (usually the backend's envelope message).
    fn notify(&self, message: &str);

    /// A failed action.
    fn notify_error(&self, message: &str);
}

/// Notifier writing through the `log` facade
///
/// Default implementation, used when the platform layer registers none.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::info!("{message}");
    }

    fn notify_error(&self, message: &str) {
        log::error!("{message}");
    }
}
