//! EventDispatcher: synchronous fan-out to registered listeners.
//!
//! Listeners run in registration order on the thread that performed the
//! mutation. A panicking listener is logged and skipped; the rest still run.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::warn;

use crate::types::UserAccountState;

use super::types::AccountEvent;

/// Listener callback.
pub type Listener = Arc<dyn Fn(&AccountEvent, &UserAccountState) + Send + Sync>;

type ListenerList = Mutex<Vec<(u64, Listener)>>;

/// Ordered observer list.
pub struct EventDispatcher {
    listeners: Arc<ListenerList>,
    next_id: AtomicU64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register a listener. Keep the returned handle to unsubscribe later;
    /// dropping it does not unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AccountEvent, &UserAccountState) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        listeners.push((id, Arc::new(callback)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
            active: AtomicBool::new(true),
        }
    }

    /// Deliver an event to every listener, in registration order.
    ///
    /// The list is snapshotted first so listeners may subscribe or
    /// unsubscribe from inside a callback.
    pub fn emit(&self, event: &AccountEvent, state: &UserAccountState) {
        let snapshot: Vec<(u64, Listener)> = match self.listeners.lock() {
            Ok(listeners) => listeners.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        for (id, listener) in snapshot {
            let result = panic::catch_unwind(AssertUnwindSafe(|| listener(event, state)));
            if result.is_err() {
                warn!(
                    listener_id = id,
                    event = event.name(),
                    "Account listener panicked; continuing with remaining listeners"
                );
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Disposer returned by `subscribe`.
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerList>,
    active: AtomicBool,
}

impl Subscription {
    /// Remove the listener. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            listeners.retain(|(id, _)| *id != self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tier;

    fn state() -> UserAccountState {
        UserAccountState::anonymous("2024-01-01")
    }

    fn event() -> AccountEvent {
        AccountEvent::Loaded {
            tier: Tier::Anonymous,
        }
    }

    #[test]
    fn test_emit_in_registration_order() {
        let dispatcher = EventDispatcher::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 1..=3 {
            let order = order.clone();
            let _sub = dispatcher.subscribe(move |_, _| order.lock().unwrap().push(i));
        }

        dispatcher.emit(&event(), &state());
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe_twice_is_noop() {
        let dispatcher = EventDispatcher::new();
        let a = dispatcher.subscribe(|_, _| {});
        let _b = dispatcher.subscribe(|_, _| {});
        assert_eq!(dispatcher.listener_count(), 2);

        a.unsubscribe();
        a.unsubscribe();
        assert_eq!(dispatcher.listener_count(), 1);
        assert!(!a.is_active());
    }

    #[test]
    fn test_panicking_listener_does_not_block_others() {
        let dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicU64::new(0));

        let _bad = dispatcher.subscribe(|_, _| panic!("listener failure"));
        let h = hits.clone();
        let _good = dispatcher.subscribe(move |_, _| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.emit(&event(), &state());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_after_dispatcher_dropped() {
        let dispatcher = EventDispatcher::new();
        let sub = dispatcher.subscribe(|_, _| {});
        drop(dispatcher);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
