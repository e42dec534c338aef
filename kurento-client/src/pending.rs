//! Pending request table.

use crate::message::Response;
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;

/// Waiters for in-flight requests, keyed by correlation id.
///
/// Each slot resolves at most once and is removed when it does.
#[derive(Debug, Default)]
pub struct PendingRequests {
    slots: Mutex<HashMap<u64, oneshot::Sender<Response>>>,
}

impl PendingRequests {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a waiter for `id`.
    pub fn register(&self, id: u64) -> oneshot::Receiver<Response> {
        let (tx, rx) = oneshot::channel();
        self.slots.lock().insert(id, tx);
        rx
    }

    /// Delivers a reply to the waiter for `id`.
    ///
    /// Returns false if no waiter is registered for `id`.
    pub fn resolve(&self, id: u64, response: Response) -> bool {
        let waiter = self.slots.lock().remove(&id);
        match waiter {
            Some(tx) => {
                // The caller may have gone away; the slot is retired either way.
                let _ = tx.send(response);
                true
            }
            None => false,
        }
    }

    /// Removes the waiter for `id` without resolving it.
    pub fn remove(&self, id: u64) -> bool {
        self.slots.lock().remove(&id).is_some()
    }

    /// Drops every waiter, failing their callers. Returns how many there were.
    pub fn clear(&self) -> usize {
        let drained: Vec<_> = self.slots.lock().drain().collect();
        drained.len()
    }

    /// Returns the number of waiters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Returns true if no request is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_once() {
        let pending = PendingRequests::new();
        let rx = pending.register(1);
        assert_eq!(pending.len(), 1);

        assert!(pending.resolve(1, Response::with_value(1, "a")));
        assert!(!pending.resolve(1, Response::with_value(1, "b")));
        assert!(pending.is_empty());

        let response = rx.await.expect("reply");
        assert_eq!(response.value(), Some(&serde_json::json!("a")));
    }

    #[test]
    fn test_resolve_unknown() {
        let pending = PendingRequests::new();
        assert!(!pending.resolve(9, Response::default()));
    }

    #[tokio::test]
    async fn test_clear_fails_waiters() {
        let pending = PendingRequests::new();
        let first = pending.register(1);
        let second = pending.register(2);

        assert_eq!(pending.clear(), 2);
        assert!(first.await.is_err());
        assert!(second.await.is_err());
    }

    #[test]
    fn test_remove() {
        let pending = PendingRequests::new();
        let _rx = pending.register(3);
        assert!(pending.remove(3));
        assert!(!pending.remove(3));
    }
}
