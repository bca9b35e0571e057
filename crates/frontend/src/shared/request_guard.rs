//! Latest-request-wins guard for async loads.
//!
//! Each load takes a ticket; when it resolves, the result is applied only if
//! no newer ticket was issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn begin(&self) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            generation,
            current: self.generation.clone(),
        }
    }

    /// Supersede all outstanding tickets without starting a new request
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        assert!(first.is_current());

        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_invalidate() {
        let guard = RequestGuard::new();
        let ticket = guard.begin();
        guard.invalidate();
        assert!(!ticket.is_current());
    }

    #[test]
    fn test_clones_share_generation() {
        let guard = RequestGuard::new();
        let other = guard.clone();
        let ticket = guard.begin();
        other.begin();
        assert!(!ticket.is_current());
    }
}
