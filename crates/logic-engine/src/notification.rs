use tokio::sync::mpsc::{Sender, error::TrySendError};
use tracing::info;

use crate::{Error, Result, service::Scenario};

/// Lifecycle transition reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The service moved from idle to running `Scenario`.
    Started(Scenario),
    /// The service stopped its scenario.
    Stopped,
    /// The service handle is being torn down.
    Released,
}

/// Sends lifecycle events to the host, if it asked for them.
#[derive(Clone, Default)]
pub struct LifecycleNotifier {
    /// Bounded channel to the host; `None` when notifications are disabled.
    tx: Option<Sender<LifecycleEvent>>,
}

impl LifecycleNotifier {
    /// Create a notifier from a lifecycle event channel.
    pub fn new(tx: Sender<LifecycleEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A notifier that drops every event.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Send `event` without blocking.
    pub fn send(&self, event: LifecycleEvent) -> Result<()> {
        let Some(tx) = &self.tx else { return Ok(()) };
        info!(event = ?event, "lifecycle_event");
        tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => Error::ChannelFull,
            TrySendError::Closed(_) => Error::ChannelClosed,
        })
    }
}
