//! Cross-field constraints.

use serde::Serialize;
use serde_json::Value;

use crate::constraint::input_value;
use crate::context::Context;
use crate::message::{Arg, Message};
use crate::path::Path;
use crate::session::Step;

/// A freestanding constraint over several already-bound values.
///
/// A correlation adds no path segment: it reports at the current path, or at
/// a path given with [`Correlation::at`] relative to it. It is evaluated and
/// logged like an atomic constraint, independently of the per-field checks
/// that ran before it.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::parse, try_validate, Config, Correlation};
///
/// let result = try_validate(&Config::new(), |cx| {
///     let start = cx.field("start", |cx| cx.check("10", &parse::int()))?;
///     let end = cx.field("end", |cx| cx.check("1", &parse::int()))?;
///     if let (Some(start), Some(end)) = (start, end) {
///         cx.correlate(
///             Correlation::new("dateRange.order", "start must not be after end")
///                 .input(&[start, end]),
///             start <= end,
///         )?;
///     }
///     Ok(())
/// });
///
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages.first().constraint_id, "dateRange.order");
/// assert!(messages.first().path.is_root());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    id: String,
    text: String,
    path: Path,
    input: Value,
    args: Vec<Value>,
}

impl Correlation {
    /// Creates a correlation reported with `id` and `text`.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            path: Path::root(),
            input: Value::Null,
            args: Vec::new(),
        }
    }

    /// Reports at `path`, relative to the current path.
    pub fn at(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Sets the input reported with the evaluation.
    pub fn input<T: Serialize + ?Sized>(mut self, input: &T) -> Self {
        self.input = input_value(input);
        self
    }

    /// Appends an argument reported with violations.
    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Returns the constraint id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Context {
    /// Evaluates a correlation whose predicate result is `holds`.
    ///
    /// The evaluation is logged once. A violation records one message with the
    /// correlation's id and text.
    pub fn correlate(&mut self, correlation: Correlation, holds: bool) -> Step<()> {
        let path = self.path().concat(&correlation.path);
        if holds {
            self.log_evaluation(&correlation.id, &path, &correlation.input, None);
            return Ok(());
        }

        let message = Message::new(correlation.id, correlation.text)
            .with_root(self.root())
            .with_path(path)
            .with_input(correlation.input)
            .with_args(correlation.args.into_iter().map(Arg::Value).collect());
        self.log_evaluation(&message.constraint_id, &message.path, &message.input, Some(&message));
        self.record(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::log::LogRecorder;
    use crate::session::try_validate;
    use serde_json::json;

    #[test]
    fn test_satisfied_correlation_logs_without_message() {
        let recorder = LogRecorder::new();
        let config = Config::new().with_logger(recorder.logger());

        let result = try_validate(&config, |cx| {
            cx.correlate(Correlation::new("range.order", "bad order"), true)
        });

        assert!(result.is_success());
        let entries = recorder.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].constraint_id(), "range.order");
        assert!(!entries[0].is_violated());
    }

    #[test]
    fn test_relative_path_and_args() {
        let result = try_validate(&Config::new(), |cx| {
            cx.field("range", |cx| {
                cx.correlate(
                    Correlation::new("range.order", "end before start")
                        .at(Path::from_field("end"))
                        .input(&json!([5, 1]))
                        .arg(5),
                    false,
                )
            })
        });

        let messages = result.into_result().unwrap_err();
        let message = messages.first();
        assert_eq!(message.path.full_name(), "range.end");
        assert_eq!(message.text, "end before start");
        assert_eq!(message.input, json!([5, 1]));
        assert_eq!(message.args, vec![Arg::Value(json!(5))]);
    }

    #[test]
    fn test_coexists_with_field_violations() {
        let result = try_validate(&Config::new(), |cx| {
            cx.field("a", |cx| cx.report(Message::new("field.bad", "bad field")))?;
            cx.correlate(Correlation::new("pair.bad", "bad pair"), false)
        });

        let messages = result.into_result().unwrap_err();
        let ids: Vec<_> = messages.iter().map(|m| m.constraint_id.as_str()).collect();
        assert_eq!(ids, vec!["field.bad", "pair.bad"]);
    }
}
