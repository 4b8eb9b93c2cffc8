//! Row-level pending indicator

use futures::stream::BoxStream;

use super::StateCell;

/// Address of the server currently being pinged, or empty.
///
/// Set when a ping starts and cleared whenever it terminates. Values are not
/// validated.
#[derive(Debug, Default)]
pub struct FilterSignal {
    cell: StateCell<String>,
}

impl FilterSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: impl Into<String>) {
        self.cell.set(value.into());
    }

    pub fn clear(&self) {
        self.cell.set(String::new());
    }

    pub fn current(&self) -> String {
        self.cell.current()
    }

    /// Current value first, then every change.
    pub fn subscribe(&self) -> BoxStream<'static, String> {
        self.cell.subscribe()
    }
}
