//! Parse and load user configuration.

use std::{ffi::OsStr, fs, path::Path};

use tracing::debug;

use crate::{Config, Error, error::excerpt_at};

/// Parse a `Config` from RON text. `path` is only used for error reporting.
pub fn load_from_str(text: &str, path: Option<&Path>) -> Result<Config, Error> {
    let cfg: Config = ron::from_str(text).map_err(|err| {
        let line = err.span.start.line;
        let col = err.span.start.col;
        let message = err.code.to_string();
        // Deserialize-time validation (e.g. a blank logic key) surfaces as a
        // custom message rather than a syntax problem.
        if let ron::Error::Message(msg) = &err.code {
            return Error::validation(msg.clone()).with_path(path);
        }
        Error::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message,
            excerpt: excerpt_at(text, line, col),
        }
    })?;
    debug!(
        actions = cfg.actions.len(),
        routes = cfg.routes.len(),
        "config_loaded"
    );
    Ok(cfg)
}

/// Load a `Config` from a `.ron` file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&text, Some(path))
}
