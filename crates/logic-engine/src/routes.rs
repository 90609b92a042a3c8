//! Static logic-key routing table.

use std::collections::HashMap;

use config::{LogicKey, RouteSpec, WorkflowCategory};
use tracing::debug;

use crate::{Error, Result};

/// Builtin routing rows: `(logic key, category, action label)`.
const BUILTIN_ROUTES: &[(&str, WorkflowCategory, &str)] = &[
    // Pre-trade setup
    ("/trigamt", WorkflowCategory::PreTradeSetup, "Trigger Amount"),
    ("/incamt", WorkflowCategory::PreTradeSetup, "Increase Amount"),
    ("/decamt", WorkflowCategory::PreTradeSetup, "Decrease Amount"),
    ("/tftrig", WorkflowCategory::PreTradeSetup, "Timeframe Trigger"),
    // Currency search
    ("/cplist", WorkflowCategory::CurrencySearch, "Open Currency List"),
    ("/search", WorkflowCategory::CurrencySearch, "Search Currency"),
    ("/confcur", WorkflowCategory::CurrencySearch, "Confirm Currency"),
    // Free exploration
    ("/free", WorkflowCategory::RandomExploration, "Free Exploration"),
    // Trade execution
    ("/buy1", WorkflowCategory::TradeExecution, "BUY"),
    ("/sell1", WorkflowCategory::TradeExecution, "SELL"),
];

/// One routing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Exact key that selects this row.
    pub key: LogicKey,
    /// Workflow the action belongs to. Never `Unknown`.
    pub category: WorkflowCategory,
    /// Label handed to the executor.
    pub label: String,
}

impl From<RouteSpec> for Route {
    fn from(spec: RouteSpec) -> Self {
        Self {
            key: spec.key,
            category: spec.category,
            label: spec.label,
        }
    }
}

/// Immutable key → route mapping, validated at construction.
///
/// Keys are matched exactly and case-sensitively. Rows keep their insertion
/// order for listing.
#[derive(Debug, Clone)]
pub struct RouteTable {
    /// Rows in insertion order.
    rows: Vec<Route>,
    /// Key → index into `rows`.
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Build a table from `rows`.
    ///
    /// Fails on a repeated key, on a row targeting `Unknown`, or on a blank label.
    pub fn new(rows: impl IntoIterator<Item = Route>) -> Result<Self> {
        let mut table = Self {
            rows: Vec::new(),
            index: HashMap::new(),
        };
        for route in rows {
            table.push(route)?;
        }
        debug!(routes = table.rows.len(), "route_table_built");
        Ok(table)
    }

    /// The builtin trading workflow table.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_rows()?)
    }

    /// The builtin table followed by `extra` configured rows.
    pub fn with_extra(extra: &[RouteSpec]) -> Result<Self> {
        let rows = builtin_rows()?
            .into_iter()
            .chain(extra.iter().cloned().map(Route::from));
        Self::new(rows)
    }

    /// Validate and append a single row.
    fn push(&mut self, route: Route) -> Result<()> {
        let key = route.key.as_str();
        if route.category == WorkflowCategory::Unknown {
            return Err(Error::UnroutableCategory {
                key: key.to_string(),
            });
        }
        if route.label.trim().is_empty() {
            return Err(Error::EmptyLabel {
                key: key.to_string(),
            });
        }
        if self.index.contains_key(key) {
            return Err(Error::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.index.insert(key.to_string(), self.rows.len());
        self.rows.push(route);
        Ok(())
    }

    /// Look up the row for `key`.
    pub fn resolve(&self, key: &str) -> Option<&Route> {
        self.index.get(key).and_then(|&i| self.rows.get(i))
    }

    /// Category for `key`, `Unknown` when there is no row.
    pub fn category_of(&self, key: &str) -> WorkflowCategory {
        self.resolve(key)
            .map_or(WorkflowCategory::Unknown, |r| r.category)
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Materialize [`BUILTIN_ROUTES`] as validated rows.
fn builtin_rows() -> Result<Vec<Route>> {
    BUILTIN_ROUTES
        .iter()
        .map(|&(key, category, label)| {
            Ok(Route {
                key: LogicKey::parse(key)?,
                category,
                label: label.to_string(),
            })
        })
        .collect()
}
