//! Error handling for the logickey binary.

use std::{io, result, time::Duration};

use logic_engine::{ActionError, Error as EngineError};
use thiserror::Error;
use tokio::task::JoinError;

/// Convenient result type for logickey operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration parsing or validation errors.
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
    /// Routing table construction errors.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// The action executor reported a failure.
    #[error("Executor failed: {0}")]
    Executor(#[source] ActionError),
    /// The service did not become available in time.
    #[error("Service not available after {0:?}")]
    NotReady(Duration),
    /// A background task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Join(#[from] JoinError),
    /// Generic error for unexpected conditions.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Helper for wrapping generic string errors.
    pub fn other<M: Into<String>>(msg: M) -> Self {
        Self::Other(msg.into())
    }

    /// Text shown to the user; configuration errors include location detail.
    pub fn report(&self) -> String {
        match self {
            Self::Config(e) | Self::Engine(EngineError::Config(e)) => e.pretty(),
            other => other.to_string(),
        }
    }
}
