//! Test support utilities for logic-engine unit and integration tests.
//! These helpers are public so integration tests and downstream hosts can use
//! them; they perform no real automation.

use std::{collections::HashSet, sync::Arc};

use parking_lot::Mutex;
use thiserror::Error;

use crate::{
    broker::ServiceBroker,
    deps::{ActionError, ActionExecutor, EventDisposition, InputEvent},
    dispatcher::Dispatcher,
    notification::LifecycleNotifier,
    routes::RouteTable,
    service::ServiceHandle,
};

/// Failure produced by [`RecordingExecutor`] for labels marked with `fail_on`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("executor failed on '{0}'")]
pub struct ExecutorFailure(pub String);

/// Executor that records every label it is asked to run.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    /// Labels in call order, including failed attempts.
    runs: Arc<Mutex<Vec<String>>>,
    /// Input events offered to the executor.
    events: Arc<Mutex<Vec<InputEvent>>>,
    /// Labels that fail with [`ExecutorFailure`].
    failing: Arc<Mutex<HashSet<String>>>,
    /// Key codes the executor claims.
    consumed_codes: Arc<Mutex<HashSet<u32>>>,
}

impl RecordingExecutor {
    /// Create an executor that succeeds for every label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make runs of `label` fail.
    #[must_use]
    pub fn fail_on(self, label: &str) -> Self {
        self.failing.lock().insert(label.to_string());
        self
    }

    /// Claim input events carrying `code`.
    #[must_use]
    pub fn consume_code(self, code: u32) -> Self {
        self.consumed_codes.lock().insert(code);
        self
    }

    /// Labels run so far.
    pub fn runs(&self) -> Vec<String> {
        self.runs.lock().clone()
    }

    /// Input events seen so far.
    pub fn events(&self) -> Vec<InputEvent> {
        self.events.lock().clone()
    }
}

impl ActionExecutor for RecordingExecutor {
    fn run(&self, label: &str) -> Result<(), ActionError> {
        self.runs.lock().push(label.to_string());
        if self.failing.lock().contains(label) {
            return Err(Box::new(ExecutorFailure(label.to_string())));
        }
        Ok(())
    }

    fn handle_input_event(&self, event: &InputEvent) -> EventDisposition {
        self.events.lock().push(*event);
        if self.consumed_codes.lock().contains(&event.code) {
            EventDisposition::Consumed
        } else {
            EventDisposition::Ignored
        }
    }
}

/// A service handle over the builtin routes, attached to `broker`, with no lifecycle channel.
pub fn handle_with(
    broker: &Arc<ServiceBroker>,
    executor: &RecordingExecutor,
) -> crate::Result<Arc<ServiceHandle>> {
    let routes = RouteTable::builtin()?;
    Ok(ServiceHandle::new(
        broker,
        Dispatcher::new(Arc::new(routes)),
        Arc::new(executor.clone()),
        LifecycleNotifier::disabled(),
    ))
}
