//! Logic Engine
//!
//! Routes short user-configured text codes ("logic keys") to trading
//! workflow actions and brokers access to the long-running automation
//! service:
//! - [`Dispatcher`] resolves a key against a [`RouteTable`] and runs the
//!   mapped action label through an [`ActionExecutor`]
//! - [`ServiceBroker`] holds the single live [`ServiceHandle`] and a single
//!   observer slot, notifying synchronously on every change
//! - [`ServiceHandle`] owns the idle/running lifecycle and reports
//!   transitions through a [`LifecycleNotifier`]
//!
//! Unknown keys and dispatch without a service are diagnostics, not errors.
//! Executor failures are never swallowed: they come back as [`ActionError`].

mod broker;
mod deps;
mod dispatcher;
mod error;
mod notification;
pub mod provider;
mod routes;
mod service;
pub mod test_support;

pub use broker::{Observer, ServiceBroker};
pub use config::{LogicKey, WorkflowCategory};
pub use deps::{ActionError, ActionExecutor, EventDisposition, InputEvent, InputKind};
pub use dispatcher::{Dispatch, Dispatcher};
pub use error::{Error, Result};
pub use notification::{LifecycleEvent, LifecycleNotifier};
pub use routes::{Route, RouteTable};
pub use service::{LifecycleState, Scenario, ServiceHandle, ServiceStatus};
