//! In-memory capture of tracing events.
//!
//! A [`CaptureLayer`] renders every event it sees with [`crate::fmt::render_event`]
//! and appends it to a shared [`Captured`] buffer. Tests use it to assert that a
//! diagnostic was (or was not) emitted:
//!
//! ```
//! let (_, logs) = logging::capture::with_capture(|| tracing::warn!(key = "/x", "unknown"));
//! assert!(logs.any(|r| r.level == "WARN" && r.field("key") == Some("\"/x\"")));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Subscriber, subscriber};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry,
};

use crate::fmt::{RenderedLog, render_event};

/// Shared buffer of captured events.
#[derive(Clone, Default)]
pub struct Captured {
    /// Events in emission order.
    events: Arc<Mutex<Vec<RenderedLog>>>,
}

impl Captured {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A layer that appends to this buffer.
    pub fn layer(&self) -> CaptureLayer {
        CaptureLayer {
            sink: self.clone(),
        }
    }

    /// Snapshot of everything captured so far.
    pub fn events(&self) -> Vec<RenderedLog> {
        self.events.lock().clone()
    }

    /// True if any captured event satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&RenderedLog) -> bool) -> bool {
        self.events.lock().iter().any(pred)
    }

    /// Number of captured events whose message equals `message`.
    pub fn count_message(&self, message: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|r| r.message == message)
            .count()
    }

    /// Drop all captured events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// Tracing layer that records events into a [`Captured`] buffer.
pub struct CaptureLayer {
    /// Destination buffer.
    sink: Captured,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let r = render_event(event);
        self.sink.events.lock().push(r);
    }
}

/// Run `f` with a thread-local subscriber that captures every event it emits.
pub fn with_capture<R>(f: impl FnOnce() -> R) -> (R, Captured) {
    let captured = Captured::new();
    let collector = registry().with(captured.layer());
    let out = subscriber::with_default(collector, f);
    (out, captured)
}
