//! Last-write-wins request sequencing
//!
//! List reloads can race a stale in-flight load (the user changed page or
//! filters before the previous response arrived). Each request takes a
//! ticket; only the most recently issued ticket's response may be applied,
//! the rest are discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Identifies one issued list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Stamps list requests with increasing tickets
#[derive(Debug, Default)]
pub struct LoadSequencer {
    issued: AtomicU64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a request about to start; supersedes all others
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.issued.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Whether the ticket still identifies the latest request
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.issued.load(Ordering::Relaxed) == ticket.0
    }

    /// Gate for applying a response: true to apply, false to discard
    pub fn accept(&self, ticket: LoadTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!(ticket = ticket.0, "stale list response discarded");
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let seq = LoadSequencer::new();
        let first = seq.begin();
        let second = seq.begin();

        // The stale response arrives after the newer request was issued.
        assert!(!seq.accept(first));
        assert!(seq.accept(second));
    }

    #[test]
    fn responses_in_order_all_apply() {
        let seq = LoadSequencer::new();
        let a = seq.begin();
        assert!(seq.accept(a));
        let b = seq.begin();
        assert!(seq.accept(b));
    }
}
