//! Replay-last-value cell

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

/// Single-writer value with any number of observers.
///
/// New observers always receive the value current at the time they attach,
/// then every later change. A slow observer only sees the latest value of a
/// burst of writes.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
}

impl<T> StateCell<T>
where
    T: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publishes `value`, even when nobody observes the cell.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Copy of the current value.
    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Raw receiver, for callers that want `changed()` / `borrow()` directly.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Lazy stream yielding the current value, then the value after each change.
    ///
    /// Every call returns an independent subscriber. The stream ends only when the
    /// cell is dropped.
    pub fn subscribe(&self) -> BoxStream<'static, T> {
        stream::unfold((self.tx.subscribe(), true), |(mut rx, first)| async move {
            if !first {
                rx.changed().await.ok()?;
            }
            let value = rx.borrow_and_update().clone();
            Some((value, (rx, false)))
        })
        .boxed()
    }
}

impl<T> Default for StateCell<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
