//! Single source of truth for which service handle is reachable.

use std::{cell::RefCell, ptr, sync::Arc};

use parking_lot::ReentrantMutex;
use tracing::{debug, trace, warn};

use crate::{
    deps::ActionError,
    dispatcher::Dispatch,
    service::ServiceHandle,
};

/// Callback told about every change of the registered handle.
pub type Observer = Arc<dyn Fn(Option<Arc<ServiceHandle>>) + Send + Sync>;

/// The handle/observer pair guarded by the broker.
#[derive(Default)]
struct Slots {
    /// Currently registered handle.
    service: Option<Arc<ServiceHandle>>,
    /// Single observer slot; registering replaces it.
    observer: Option<Observer>,
}

/// Holds at most one live [`ServiceHandle`] and at most one [`Observer`].
///
/// The observer slot is single-occupancy on purpose: registering a new
/// observer discards the previous one, so a recreated UI supersedes its stale
/// callback without unregistering it.
///
/// Both mutators and the observer call run under one re-entrant lock, so an
/// observer is never handed a handle that a concurrent `set_service` has
/// already replaced, and it may call back into the broker from the same
/// thread. Observers must return promptly. Dispatch releases the lock before
/// the executor runs.
#[derive(Default)]
pub struct ServiceBroker {
    /// Guarded state. `RefCell` borrows never span an observer call.
    slots: ReentrantMutex<RefCell<Slots>>,
}

impl ServiceBroker {
    /// Create an empty broker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registered handle (or clear it with `None`) and notify the observer.
    pub fn set_service(&self, service: Option<Arc<ServiceHandle>>) {
        let guard = self.slots.lock();
        let observer = {
            let mut slots = guard.borrow_mut();
            slots.service.clone_from(&service);
            slots.observer.clone()
        };
        debug!(available = service.is_some(), "service_set");
        if let Some(observer) = observer {
            observer(service);
        }
    }

    /// Replace the observer. A present observer is called immediately with the
    /// current handle; `None` clears the slot.
    pub fn register_observer(&self, observer: Option<Observer>) {
        let guard = self.slots.lock();
        let current = {
            let mut slots = guard.borrow_mut();
            slots.observer.clone_from(&observer);
            slots.service.clone()
        };
        trace!(present = observer.is_some(), "observer_registered");
        if let Some(observer) = observer {
            observer(current);
        }
    }

    /// Convenience wrapper around [`register_observer`](Self::register_observer).
    pub fn observe<F>(&self, f: F)
    where
        F: Fn(Option<Arc<ServiceHandle>>) + Send + Sync + 'static,
    {
        self.register_observer(Some(Arc::new(f)));
    }

    /// True iff a handle is registered.
    pub fn is_available(&self) -> bool {
        self.slots.lock().borrow().service.is_some()
    }

    /// The registered handle, if any.
    pub fn current(&self) -> Option<Arc<ServiceHandle>> {
        self.slots.lock().borrow().service.clone()
    }

    /// Route `key` through the registered handle.
    ///
    /// Without a handle this logs a warning and returns
    /// [`Dispatch::Unavailable`]. Executor failures are returned unchanged.
    pub fn dispatch(&self, key: &str) -> Result<Dispatch, ActionError> {
        let Some(service) = self.current() else {
            warn!(key, "dispatch_without_service");
            return Ok(Dispatch::Unavailable);
        };
        service.execute_logic_key(key)
    }

    /// Drop the observer, then the handle, without notifying anyone.
    pub fn clear(&self) {
        let guard = self.slots.lock();
        let old = guard.replace(Slots::default());
        drop(guard);
        debug!(had_service = old.service.is_some(), "broker_cleared");
    }

    /// Run `f` while holding the broker's critical section.
    pub(crate) fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.slots.lock();
        f()
    }

    /// True iff `handle` is the registered handle.
    pub(crate) fn holds(&self, handle: &ServiceHandle) -> bool {
        self.slots
            .lock()
            .borrow()
            .service
            .as_ref()
            .is_some_and(|s| ptr::eq(Arc::as_ptr(s), handle))
    }

    /// Clear the registered handle only if it is `handle`.
    pub(crate) fn withdraw(&self, handle: &ServiceHandle) {
        let _guard = self.slots.lock();
        if self.holds(handle) {
            self.set_service(None);
        } else {
            trace!("withdraw_skipped_not_registered");
        }
    }
}
