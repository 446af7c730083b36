//! Edit-session store module.
//!
//! This module contains the store that owns the current session snapshot:
//! - `Store`, which serializes dispatches and notifies subscribers
//! - `TransitionTable` and the four session transitions
//! - `Subscription` handles and the `Clock` used to stamp new records
//! - Store error handling

mod clock;
mod error;
mod subscription;
pub mod transition;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use subscription::{Listener, Subscription};
pub use transition::{TransitionFn, TransitionTable};

use crate::action::Action;
use crate::state::SessionState;
use log::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, ThreadId};
use subscription::ListenerRegistry;

/// Result of a dispatch that reports whether the transition changed anything.
///
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub state: Arc<SessionState>,
    /// False when the guard rejected the action and the snapshot is unchanged.
    pub accepted: bool,
    /// Number of subscribers that returned an error or panicked.
    pub failed_subscribers: usize,
}

/// Owns the current session snapshot and applies dispatched actions to it.
///
/// Dispatches are serialized by a single lock held from reading the current
/// snapshot until every subscriber has been notified. A listener that
/// dispatches into the store notifying it gets `StoreError::ReentrantDispatch`.
///
pub struct Store {
    table: TransitionTable,
    clock: Box<dyn Clock>,
    dispatch_lock: Mutex<()>,
    dispatching: Mutex<Option<ThreadId>>,
    state: RwLock<Arc<SessionState>>,
    listeners: Arc<ListenerRegistry>,
}

impl Store {
    /// Returns a store over the initial state using the standard transitions
    /// and the system clock.
    ///
    pub fn new(initial: SessionState) -> Self {
        Store::with_table(initial, TransitionTable::standard(), SystemClock)
    }

    /// Returns a store with the given transition table and clock.
    ///
    pub fn with_table<C>(initial: SessionState, table: TransitionTable, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        debug!(
            "Initializing store with {} employees and {:?}...",
            initial.records().len(),
            table
        );
        Store {
            table,
            clock: Box::new(clock),
            dispatch_lock: Mutex::new(()),
            dispatching: Mutex::new(None),
            state: RwLock::new(Arc::new(initial)),
            listeners: Arc::new(ListenerRegistry::default()),
        }
    }

    /// Returns the current snapshot.
    ///
    pub fn get_state(&self) -> Arc<SessionState> {
        // The lock only guards a pointer swap, so a poisoned guard still holds
        // a complete snapshot.
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Applies the action and returns the new snapshot.
    ///
    pub fn dispatch(&self, action: Action) -> Result<Arc<SessionState>, StoreError> {
        self.dispatch_with_outcome(action).map(|dispatched| dispatched.state)
    }

    /// Applies the action and returns the new snapshot together with whether
    /// the transition was accepted. Subscribers are notified either way.
    ///
    pub fn dispatch_with_outcome(&self, action: Action) -> Result<Dispatched, StoreError> {
        let current_thread = thread::current().id();
        if *self.dispatching.lock().unwrap_or_else(PoisonError::into_inner) == Some(current_thread)
        {
            warn!("Rejected re-entrant dispatch of '{}'", action.kind());
            return Err(StoreError::ReentrantDispatch(action.kind()));
        }

        let _guard = self
            .dispatch_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        let _owner = DispatchOwner::claim(&self.dispatching, current_thread);

        let kind = action.kind();
        let transition = self
            .table
            .get(kind)
            .ok_or(StoreError::UnknownActionKind(kind))?;

        let current = self.get_state();
        let next = transition(&current, &action, self.clock.now());
        let accepted = !Arc::ptr_eq(&current, &next);
        if accepted {
            debug!(
                "Dispatched '{}': {} -> {} ({})",
                kind,
                current.mode(),
                next.mode(),
                next.last_action()
            );
        } else {
            debug!("Dispatched '{}' rejected in {} mode", kind, current.mode());
        }

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
        let failed_subscribers = self.notify(&next);

        Ok(Dispatched {
            state: next,
            accepted,
            failed_subscribers,
        })
    }

    /// Registers a listener invoked after every dispatch, in registration
    /// order.
    ///
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<SessionState>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = self.listeners.add(Arc::new(listener));
        debug!("Registered subscriber {}", id);
        Subscription::new(id, &self.listeners)
    }

    /// Returns the number of registered listeners.
    ///
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self, state: &Arc<SessionState>) -> usize {
        let mut failed = 0;
        for (id, listener) in self.listeners.snapshot() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(state))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failed += 1;
                    error!("Subscriber {} failed: {:#}", id, e);
                }
                Err(payload) => {
                    failed += 1;
                    error!("Subscriber {} panicked: {}", id, panic_message(payload.as_ref()));
                }
            }
        }
        failed
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new(SessionState::default())
    }
}

/// Records the thread holding the dispatch lock until dropped.
///
struct DispatchOwner<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> DispatchOwner<'a> {
    fn claim(slot: &'a Mutex<Option<ThreadId>>, thread: ThreadId) -> Self {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread);
        DispatchOwner { slot }
    }
}

impl Drop for DispatchOwner<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
