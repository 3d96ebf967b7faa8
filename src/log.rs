//! Evaluation log entries.
//!
//! A configured logger receives exactly one [`LogEntry`] per atomic constraint
//! evaluation, in evaluation order. Composite evaluations (conjunctions,
//! disjunctions, per-element and nested scopes) are never logged themselves.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::message::Arg;

/// A callback receiving evaluation log entries.
pub type Logger = Arc<dyn Fn(&LogEntry) + Send + Sync>;

/// The outcome of one atomic constraint evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    /// The constraint held.
    Satisfied {
        constraint_id: String,
        root: String,
        path: String,
        input: Value,
    },
    /// The constraint was violated.
    Violated {
        constraint_id: String,
        root: String,
        path: String,
        input: Value,
        args: Vec<Arg>,
    },
}

impl LogEntry {
    /// Returns the id of the evaluated constraint.
    pub fn constraint_id(&self) -> &str {
        match self {
            LogEntry::Satisfied { constraint_id, .. } | LogEntry::Violated { constraint_id, .. } => {
                constraint_id
            }
        }
    }

    /// Returns the rendered path at which the constraint was evaluated.
    pub fn path(&self) -> &str {
        match self {
            LogEntry::Satisfied { path, .. } | LogEntry::Violated { path, .. } => path,
        }
    }

    /// Returns the evaluated input.
    pub fn input(&self) -> &Value {
        match self {
            LogEntry::Satisfied { input, .. } | LogEntry::Violated { input, .. } => input,
        }
    }

    /// Returns true for violated evaluations.
    pub fn is_violated(&self) -> bool {
        matches!(self, LogEntry::Violated { .. })
    }
}

/// A logger that keeps every entry in memory.
///
/// Clones share the same storage, so a recorder can be handed to several
/// configurations and threads and inspected afterwards.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, try_validate, Config, LogRecorder};
///
/// let recorder = LogRecorder::new();
/// let config = Config::new().with_logger(recorder.logger());
///
/// let result = try_validate(&config, |cx| {
///     cx.check("kova", &chars::not_blank())?;
///     Ok(())
/// });
///
/// assert!(result.is_success());
/// assert_eq!(recorder.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogRecorder {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LogRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a logger callback that appends to this recorder.
    pub fn logger(&self) -> impl Fn(&LogEntry) + Send + Sync + 'static {
        let entries = Arc::clone(&self.entries);
        move |entry: &LogEntry| entries.lock().push(entry.clone())
    }

    /// Returns a snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Returns the number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Discards all recorded entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn satisfied(id: &str) -> LogEntry {
        LogEntry::Satisfied {
            constraint_id: id.to_string(),
            root: "User".to_string(),
            path: "name".to_string(),
            input: json!("Alice"),
        }
    }

    #[test]
    fn test_recorder_shares_storage_between_clones() {
        let recorder = LogRecorder::new();
        let log = recorder.clone().logger();

        log(&satisfied("a"));
        log(&satisfied("b"));

        assert_eq!(recorder.len(), 2);
        let ids: Vec<_> = recorder
            .entries()
            .iter()
            .map(|e| e.constraint_id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_entry_accessors() {
        let entry = LogEntry::Violated {
            constraint_id: "kova.charSequence.notBlank".to_string(),
            root: "User".to_string(),
            path: "name".to_string(),
            input: json!(""),
            args: Vec::new(),
        };
        assert!(entry.is_violated());
        assert_eq!(entry.path(), "name");
        assert_eq!(entry.input(), &json!(""));
        assert!(!satisfied("a").is_violated());
    }

    #[test]
    fn test_serialized_kind_tag() {
        let json = serde_json::to_value(satisfied("a")).unwrap();
        assert_eq!(json["kind"], "satisfied");
        assert_eq!(json["constraint_id"], "a");
    }
}
