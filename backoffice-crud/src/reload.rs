//! Reload signaling
//!
//! A narrow pub/sub channel carrying a single integer version. Mutations
//! bump it; list-loading effects subscribe and refetch when it moves.
//! Consumers depend on the version value, never on an ambient global — the
//! signal is passed explicitly to whoever needs it.

use std::sync::Arc;

use tokio::sync::watch;

/// A monotonically increasing version counter with subscribers
#[derive(Debug, Clone)]
pub struct ReloadSignal {
    tx: Arc<watch::Sender<u64>>,
}

impl ReloadSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// The current version
    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Bump the version after a successful mutation; returns the new value
    pub fn bump(&self) -> u64 {
        self.tx.send_modify(|v| *v += 1);
        self.version()
    }

    /// Subscribe a list effect to version changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ReloadSignal {
    fn default() -> Self {
        Self::new()
    }
}
