//! Value types carried by the configuration file.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// Maximum number of characters accepted for a logic key.
pub const MAX_LOGIC_KEY_LEN: usize = 32;

/// Validation message for an empty or whitespace-only logic key.
pub const LOGIC_KEY_REQUIRED: &str = "Logic key required";

/// A short opaque text token selecting an automation workflow (e.g. `/buy1`).
///
/// Only two properties are enforced: the key is not blank and it fits within
/// [`MAX_LOGIC_KEY_LEN`] characters. The stored text is kept verbatim, so
/// routing stays an exact, case-sensitive match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LogicKey(String);

impl LogicKey {
    /// Validate `value` and wrap it as a logic key.
    pub fn parse(value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::validation(LOGIC_KEY_REQUIRED));
        }
        let len = value.chars().count();
        if len > MAX_LOGIC_KEY_LEN {
            return Err(Error::validation(format!(
                "Logic key '{}' is {} characters long (max {})",
                value, len, MAX_LOGIC_KEY_LEN
            )));
        }
        Ok(Self(value))
    }

    /// Borrow the raw key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LogicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LogicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for LogicKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LogicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// Closed set of workflow categories a logic key can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowCategory {
    /// Amount and timeframe setup ahead of a trade.
    PreTradeSetup,
    /// Opening, searching and confirming the traded currency pair.
    CurrencySearch,
    /// Human-like free exploration between trades.
    RandomExploration,
    /// Placing a trade.
    TradeExecution,
    /// Fallback for keys with no route. Never a valid route target.
    Unknown,
}

impl WorkflowCategory {
    /// Short human name used in logs and listings.
    pub fn name(self) -> &'static str {
        match self {
            Self::PreTradeSetup => "Pre-Trade",
            Self::CurrencySearch => "Currency",
            Self::RandomExploration => "Randomized",
            Self::TradeExecution => "Trade",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WorkflowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// An extra routing table row declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    /// Key matched exactly against dispatched logic keys.
    pub key: LogicKey,
    /// Workflow the key belongs to.
    pub category: WorkflowCategory,
    /// Action label handed to the executor.
    pub label: String,
}

/// A saved click action whose behaviour is selected by its logic key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClickAction {
    /// Display name of the action.
    #[serde(default)]
    pub name: String,
    /// Logic key dispatched when the action fires.
    pub logic_key: LogicKey,
}

/// Scenario launched when the service starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    /// Scenario identity; `None` when the scenario has no stored id.
    #[serde(default)]
    pub id: Option<i64>,
    /// True for detection-driven scenarios, false for fixed-sequence ones.
    #[serde(default)]
    pub smart: bool,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scenario to launch.
    #[serde(default)]
    pub scenario: ScenarioSpec,
    /// Saved click actions, fired in order by the host.
    #[serde(default)]
    pub actions: Vec<ClickAction>,
    /// Routing rows appended to the builtin table.
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl Config {
    /// Logic keys of the configured click actions, in order.
    pub fn action_keys(&self) -> impl Iterator<Item = &LogicKey> {
        self.actions.iter().map(|a| &a.logic_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_logic_key_is_rejected() {
        for raw in ["", " ", "\t\n"] {
            let err = LogicKey::parse(raw).unwrap_err();
            assert_eq!(err.to_string(), LOGIC_KEY_REQUIRED);
        }
    }

    #[test]
    fn logic_key_is_kept_verbatim() {
        let key = LogicKey::parse(" /Buy1").unwrap();
        assert_eq!(key.as_str(), " /Buy1");
        assert_eq!(key.to_string(), " /Buy1");
    }

    #[test]
    fn logic_key_length_limit() {
        let max = "k".repeat(MAX_LOGIC_KEY_LEN);
        assert!(LogicKey::parse(max.clone()).is_ok());
        assert!(LogicKey::parse(format!("{max}k")).is_err());
    }

    #[test]
    fn category_names() {
        assert_eq!(WorkflowCategory::TradeExecution.to_string(), "Trade");
        assert_eq!(WorkflowCategory::Unknown.name(), "Unknown");
    }
}
