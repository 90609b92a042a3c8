//! Process-wide broker accessor.
//!
//! Hosts that cannot thread an `Arc<ServiceBroker>` through every layer call
//! [`init`] once and [`get`] elsewhere. Prefer passing the broker explicitly
//! where possible; [`teardown`] resets the process to an uninstalled state.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::debug;

use crate::broker::ServiceBroker;

/// The installed broker, if any.
static BROKER: OnceLock<Mutex<Option<Arc<ServiceBroker>>>> = OnceLock::new();

/// Access the global slot.
fn slot() -> &'static Mutex<Option<Arc<ServiceBroker>>> {
    BROKER.get_or_init(|| Mutex::new(None))
}

/// Install a broker, or return the one already installed.
pub fn init() -> Arc<ServiceBroker> {
    let mut guard = slot().lock();
    if let Some(existing) = guard.as_ref() {
        return Arc::clone(existing);
    }
    debug!("broker_installed");
    Arc::clone(guard.insert(Arc::new(ServiceBroker::new())))
}

/// The installed broker, if any.
pub fn get() -> Option<Arc<ServiceBroker>> {
    slot().lock().clone()
}

/// Uninstall the broker, dropping its observer and handle.
pub fn teardown() {
    let taken = slot().lock().take();
    if let Some(broker) = taken {
        broker.clear();
        debug!("broker_torn_down");
    }
}
