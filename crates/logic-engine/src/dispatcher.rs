//! Logic-key dispatch over a route table.

use std::sync::Arc;

use config::WorkflowCategory;
use tracing::{debug, warn};

use crate::{
    deps::{ActionError, ActionExecutor},
    routes::{Route, RouteTable},
};

/// Outcome of routing a logic key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The key matched `Route` and its action ran successfully.
    Executed(Route),
    /// No row matched the key; nothing ran.
    UnknownKey,
    /// No service was registered to route through; nothing ran.
    Unavailable,
}

impl Dispatch {
    /// Category of the dispatched key (`Unknown` unless executed).
    pub fn category(&self) -> WorkflowCategory {
        match self {
            Self::Executed(route) => route.category,
            Self::UnknownKey | Self::Unavailable => WorkflowCategory::Unknown,
        }
    }
}

/// Resolves logic keys against a [`RouteTable`] and runs the mapped action.
///
/// Stateless apart from the shared table; cheap to clone.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    /// Routing table shared by all clones.
    routes: Arc<RouteTable>,
}

impl Dispatcher {
    /// Create a dispatcher over `routes`.
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self { routes }
    }

    /// The routing table in use.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Route `key` and run its action on `executor`.
    ///
    /// Unknown keys log a warning and return [`Dispatch::UnknownKey`] without
    /// touching the executor. Executor failures are returned as-is.
    pub fn execute(
        &self,
        key: &str,
        executor: &dyn ActionExecutor,
    ) -> Result<Dispatch, ActionError> {
        let Some(route) = self.routes.resolve(key) else {
            warn!(key, "unknown_logic_key");
            return Ok(Dispatch::UnknownKey);
        };
        let label = route.label.as_str();
        match route.category {
            WorkflowCategory::PreTradeSetup => debug!(label, "pre_trade_workflow"),
            WorkflowCategory::CurrencySearch => debug!(label, "currency_workflow"),
            WorkflowCategory::RandomExploration => debug!(label, "randomized_workflow"),
            // Single opaque action; the outcome is not awaited here.
            WorkflowCategory::TradeExecution => debug!(direction = label, "trade_workflow"),
            WorkflowCategory::Unknown => {
                warn!(key, "unroutable_logic_key");
                return Ok(Dispatch::UnknownKey);
            }
        }
        executor.run(label)?;
        Ok(Dispatch::Executed(route.clone()))
    }
}
