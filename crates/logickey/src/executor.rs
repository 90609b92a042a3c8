//! Stand-in executor for hosts without a physical automation backend.

use std::sync::atomic::{AtomicU64, Ordering};

use logic_engine::{ActionError, ActionExecutor, EventDisposition, InputEvent};
use tracing::info;

/// Logs each action instead of performing it.
#[derive(Default)]
pub struct TraceExecutor {
    /// Number of actions run so far.
    count: AtomicU64,
}

impl TraceExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions run so far.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

impl ActionExecutor for TraceExecutor {
    fn run(&self, label: &str) -> Result<(), ActionError> {
        let n = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        info!(label, n, "action");
        Ok(())
    }

    fn handle_input_event(&self, event: &InputEvent) -> EventDisposition {
        info!(code = event.code, kind = ?event.kind, "input_event_ignored");
        EventDisposition::Ignored
    }
}
