//! Graceful-stop coordination.
//!
//! The process owns a single `Shutdown`; the signal watcher triggers it
//! and the serve loop holds a subscription, so in-flight relays run to
//! completion before the listener closes. Dropping the coordinator has
//! the same effect as triggering it, which lets tests tear servers down
//! implicitly.

use tokio::sync::broadcast;

/// Hands out shutdown subscriptions and fires the stop signal.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the stop signal. Each long-running task holds one
    /// receiver and finishes its current work when it fires.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the stop signal. Idempotent; subscribers that already
    /// stopped are simply gone.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
