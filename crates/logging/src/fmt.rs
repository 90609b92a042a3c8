//! Render `tracing` events into concise logfmt records.
//!
//! Extracts level, target, and message from an event and keeps the remaining
//! fields as ordered `key=value` pairs so callers can both print and inspect them.

use std::fmt::{self, Debug, Display};

use tracing::{
    Event,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field, or the rendered fields when no message was given.
    pub message: String,
    /// Non-message fields in recording order, values already formatted.
    pub fields: Vec<(String, String)>,
}

impl RenderedLog {
    /// Look up a recorded field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for RenderedLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level={} target={} msg={:?}",
            self.level, self.target, self.message
        )?;
        for (k, v) in &self.fields {
            write!(f, " {}={}", k, v)?;
        }
        Ok(())
    }
}

/// Collects the message and remaining fields of one event.
#[derive(Default)]
struct FieldCollector {
    /// Captured `message` field, if present.
    msg: Option<String>,
    /// Remaining fields rendered as `(key, value)`.
    fields: Vec<(String, String)>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.msg = Some(value.to_string());
        } else {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.msg = Some(format!("{:?}", value));
        } else {
            self.fields
                .push((field.name().to_string(), format!("{:?}", value)));
        }
    }
}

/// Extract level, target, message and fields from a tracing Event.
///
/// If the event has no `message` field, the message is the space-joined
/// `key=value` rendering of the other fields.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let meta = event.metadata();
    let mut vis = FieldCollector::default();
    event.record(&mut vis);
    let message = vis.msg.unwrap_or_else(|| {
        vis.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    });
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message,
        fields: vis.fields,
    }
}
