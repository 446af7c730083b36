use crate::state::SessionState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Callback invoked with each committed snapshot. Returning an error reports
/// a subscriber failure without affecting the store.
///
pub type Listener = dyn Fn(&Arc<SessionState>) -> anyhow::Result<()> + Send + Sync;

/// Ordered list of registered listeners.
///
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Arc<Listener>)>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&self, listener: Arc<Listener>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Removes the listener and returns true if it was still registered.
    ///
    pub(crate) fn remove(&self, id: u64) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Returns the listeners in registration order.
    ///
    pub(crate) fn snapshot(&self) -> Vec<(u64, Arc<Listener>)> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Handle returned by `Store::subscribe`.
///
/// Dropping the handle leaves the listener registered; call `unsubscribe` to
/// remove it. The handle does not keep the store alive.
///
pub struct Subscription {
    id: u64,
    registry: Weak<ListenerRegistry>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &Arc<ListenerRegistry>) -> Self {
        Subscription {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    /// Removes the listener. Calling this more than once is a no-op.
    ///
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }

    /// Returns the listener's identifier within its store.
    ///
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
