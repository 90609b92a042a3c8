use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the logic engine.
///
/// Executor failures are deliberately not represented here: they travel
/// through [`crate::ActionError`] untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// Two routing rows share the same logic key.
    #[error("Duplicate route for logic key '{key}'")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },

    /// A routing row targets the `Unknown` fallback category.
    #[error("Route '{key}' targets the Unknown category")]
    UnroutableCategory {
        /// Offending key.
        key: String,
    },

    /// A routing row has a blank action label.
    #[error("Route '{key}' has an empty action label")]
    EmptyLabel {
        /// Offending key.
        key: String,
    },

    /// A routing key failed logic-key validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),

    /// The lifecycle event channel has been closed by the receiver.
    #[error("Lifecycle channel closed")]
    ChannelClosed,

    /// The lifecycle event channel is at capacity.
    #[error("Lifecycle channel full")]
    ChannelFull,
}
