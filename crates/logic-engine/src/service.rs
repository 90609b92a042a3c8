//! The automation service handle and its start/stop/release lifecycle.

use std::sync::{Arc, Weak};

use config::ScenarioSpec;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    broker::ServiceBroker,
    deps::{ActionError, ActionExecutor, EventDisposition, InputEvent},
    dispatcher::{Dispatch, Dispatcher},
    notification::{LifecycleEvent, LifecycleNotifier},
};

/// Scenario a service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    /// Stored scenario id; `None` for scenarios without one.
    pub id: Option<i64>,
    /// Detection-driven ("smart") versus fixed-sequence ("dumb").
    pub smart: bool,
}

impl Scenario {
    /// A detection-driven scenario with a stored id.
    pub fn smart(id: i64) -> Self {
        Self {
            id: Some(id),
            smart: true,
        }
    }

    /// A fixed-sequence scenario without a stored id.
    pub fn dumb() -> Self {
        Self {
            id: None,
            smart: false,
        }
    }
}

impl From<ScenarioSpec> for Scenario {
    fn from(spec: ScenarioSpec) -> Self {
        Self {
            id: spec.id,
            smart: spec.smart,
        }
    }
}

/// Lifecycle state of a service handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// No scenario running; not registered with the broker.
    #[default]
    Idle,
    /// A scenario is running and the handle is registered.
    Running,
}

/// Point-in-time view of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceStatus {
    /// Current state.
    pub state: LifecycleState,
    /// Active scenario while running.
    pub scenario: Option<Scenario>,
}

/// Capability representing a running automation service.
///
/// `start` registers the handle with its broker; `stop` and `release`
/// withdraw it, but only while it is still the registered handle. All three
/// are idempotent and serialized through the broker's critical section.
pub struct ServiceHandle {
    /// Current lifecycle status.
    status: Mutex<ServiceStatus>,
    /// Routes logic keys to actions.
    dispatcher: Dispatcher,
    /// Performs the routed actions.
    executor: Arc<dyn ActionExecutor>,
    /// Broker this handle registers with. Weak to avoid a cycle.
    broker: Weak<ServiceBroker>,
    /// Reports transitions to the lifecycle host.
    notifier: LifecycleNotifier,
}

impl ServiceHandle {
    /// Create an idle handle bound to `broker`.
    pub fn new(
        broker: &Arc<ServiceBroker>,
        dispatcher: Dispatcher,
        executor: Arc<dyn ActionExecutor>,
        notifier: LifecycleNotifier,
    ) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(ServiceStatus::default()),
            dispatcher,
            executor,
            broker: Arc::downgrade(broker),
            notifier,
        })
    }

    /// Start `scenario`. Returns false (and changes nothing) if already running
    /// and still registered with the broker.
    pub fn start(self: &Arc<Self>, scenario: Scenario) -> bool {
        let started = self.serialized(|broker| {
            // A running handle the broker no longer holds counts as idle.
            let registered = broker.is_none_or(|b| b.holds(self));
            {
                let mut st = self.status.lock();
                if st.state == LifecycleState::Running {
                    if registered {
                        debug!(running = ?st.scenario, "start_ignored_already_running");
                        return false;
                    }
                    debug!(stale = ?st.scenario, "start_reregistering");
                }
                *st = ServiceStatus {
                    state: LifecycleState::Running,
                    scenario: Some(scenario),
                };
            }
            info!(scenario = ?scenario.id, smart = scenario.smart, "service_started");
            if let Some(broker) = broker {
                broker.set_service(Some(Arc::clone(self)));
            }
            true
        });
        if started {
            self.notify(LifecycleEvent::Started(scenario));
        }
        started
    }

    /// Stop the running scenario. Returns false if already idle.
    pub fn stop(self: &Arc<Self>) -> bool {
        let stopped = self.serialized(|broker| {
            {
                let mut st = self.status.lock();
                if st.state == LifecycleState::Idle {
                    debug!("stop_ignored_already_idle");
                    return false;
                }
                *st = ServiceStatus::default();
            }
            info!("service_stopped");
            if let Some(broker) = broker {
                broker.withdraw(self);
            }
            true
        });
        if stopped {
            self.notify(LifecycleEvent::Stopped);
        }
        stopped
    }

    /// Force the handle idle from any state and signal that it is being torn down.
    ///
    /// A released handle may be started again.
    pub fn release(self: &Arc<Self>) {
        self.serialized(|broker| {
            *self.status.lock() = ServiceStatus::default();
            info!("service_released");
            if let Some(broker) = broker {
                broker.withdraw(self);
            }
        });
        self.notify(LifecycleEvent::Released);
    }

    /// Current status snapshot.
    pub fn status(&self) -> ServiceStatus {
        *self.status.lock()
    }

    /// True while a scenario is running.
    pub fn is_started(&self) -> bool {
        self.status().state == LifecycleState::Running
    }

    /// The dispatcher used for logic keys.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Route and run `key` on this handle's executor.
    pub fn execute_logic_key(&self, key: &str) -> Result<Dispatch, ActionError> {
        info!(key, "execute_logic_key");
        self.dispatcher.execute(key, self.executor.as_ref())
    }

    /// Forward a raw input event to the executor.
    pub fn on_input_event(&self, event: &InputEvent) -> EventDisposition {
        self.executor.handle_input_event(event)
    }

    /// Run `f` inside the broker's critical section, or directly if the broker is gone.
    fn serialized<R>(&self, f: impl FnOnce(Option<&ServiceBroker>) -> R) -> R {
        match self.broker.upgrade() {
            Some(broker) => broker.exclusive(|| f(Some(broker.as_ref()))),
            None => {
                warn!("service_broker_gone");
                f(None)
            }
        }
    }

    /// Report `event` to the host; delivery failures are logged only.
    fn notify(&self, event: LifecycleEvent) {
        if let Err(e) = self.notifier.send(event) {
            warn!(error = %e, event = ?event, "lifecycle_event_dropped");
        }
    }
}
