//! The validation context threaded through one run.
//!
//! [`Context`] carries the current path, the run configuration (fail-fast
//! flag, clock, logger), the root identifier and the message sink. It is
//! created by a [`Session`](crate::Session) for exactly one top-level call and
//! passed explicitly to every validating function.

use std::mem;

use serde::Serialize;

use crate::config::Config;
use crate::constraint::{input_value, Constraint, ConstraintContext, Verdict};
use crate::log::LogEntry;
use crate::message::Message;
use crate::path::{Path, PathSegment};
use crate::session::Step;

/// The accumulation surface of one validation run.
///
/// The path changes only through scoped descents ([`Context::field`],
/// [`Context::index`], [`Context::on_each`], ...) and is restored when the
/// scope exits. Recorded messages own a copy of the path they were recorded
/// at, so later descents never alter them.
pub struct Context {
    config: Config,
    root: String,
    path: Path,
    pub(crate) sink: Vec<Message>,
}

impl Context {
    pub(crate) fn new(config: Config, root: impl Into<String>) -> Self {
        Self {
            config,
            root: root.into(),
            path: Path::root(),
            sink: Vec::new(),
        }
    }

    /// Returns the root identifier of this run.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the current path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true if the run stops at the first violation.
    pub fn is_fail_fast(&self) -> bool {
        self.config.is_fail_fast()
    }

    /// Returns the number of messages recorded in the current accumulation
    /// scope.
    pub fn violation_count(&self) -> usize {
        self.sink.len()
    }

    /// Evaluates an atomic constraint at the current path.
    ///
    /// The evaluation is logged once. A violation is recorded; in fail-fast
    /// mode this returns `Err(Halt)`, otherwise `Ok(None)`. When the
    /// constraint holds its output is returned as `Some`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{catalog::{chars, parse}, try_validate, Config};
    ///
    /// let result = try_validate(&Config::new(), |cx| {
    ///     cx.check("  ", &chars::not_blank())?;
    ///     let parsed = cx.check("12", &parse::int())?;
    ///     Ok(parsed)
    /// });
    ///
    /// let messages = result.into_result().unwrap_err();
    /// assert_eq!(messages.len(), 1);
    /// assert_eq!(messages.first().constraint_id, "kova.charSequence.notBlank");
    /// ```
    pub fn check<T, C>(&mut self, input: &T, constraint: &C) -> Step<Option<C::Output>>
    where
        T: Serialize + ?Sized,
        C: Constraint<T> + ?Sized,
    {
        let value = input_value(input);
        let verdict = {
            let cx = ConstraintContext {
                root: &self.root,
                path: &self.path,
                input: &value,
                config: &self.config,
            };
            constraint.evaluate(input, &cx)
        };

        match verdict {
            Verdict::Satisfied(output) => {
                tracing::trace!(
                    constraint = constraint.id(),
                    path = %self.path,
                    "constraint satisfied"
                );
                self.log(LogEntry::Satisfied {
                    constraint_id: constraint.id().to_string(),
                    root: self.root.clone(),
                    path: self.path.full_name(),
                    input: value,
                });
                Ok(Some(output))
            }
            Verdict::Violated(message) => {
                let message = self.place(message, &value);
                tracing::trace!(
                    constraint = constraint.id(),
                    path = %self.path,
                    "constraint violated"
                );
                self.log(LogEntry::Violated {
                    constraint_id: message.constraint_id.clone(),
                    root: self.root.clone(),
                    path: self.path.full_name(),
                    input: value,
                    args: message.args.clone(),
                });
                self.record(message)?;
                Ok(None)
            }
        }
    }

    /// Fills in whatever a constraint left unset on its violation: the
    /// current path when the message sits at the root, the run's root and
    /// the checked input.
    fn place(&self, message: Message, value: &serde_json::Value) -> Message {
        let message = if message.path.is_root() && !self.path.is_root() {
            message.with_path(self.path.clone())
        } else {
            message
        };
        let message = if message.root.is_empty() {
            message.with_root(self.root.clone())
        } else {
            message
        };
        if message.input.is_null() {
            message.with_input(value.clone())
        } else {
            message
        }
    }

    /// Records a message built outside of a constraint. Its path is taken as
    /// relative to the current path and its root is set to this run's root.
    pub fn report(&mut self, message: Message) -> Step<()> {
        let message = if self.path.is_root() {
            message
        } else {
            message.relocate(&self.path)
        };
        let message = message.with_root(self.root.clone());
        self.record(message)
    }

    /// Sends a log entry to the configured logger.
    pub(crate) fn log(&self, entry: LogEntry) {
        if let Some(logger) = self.config.logger() {
            logger(&entry);
        }
    }

    /// Logs an atomic evaluation that did not go through [`Context::check`].
    pub(crate) fn log_evaluation(
        &self,
        constraint_id: &str,
        path: &Path,
        input: &serde_json::Value,
        violation: Option<&Message>,
    ) {
        tracing::trace!(
            constraint = constraint_id,
            path = %path,
            violated = violation.is_some(),
            "constraint evaluated"
        );
        let entry = match violation {
            None => LogEntry::Satisfied {
                constraint_id: constraint_id.to_string(),
                root: self.root.clone(),
                path: path.full_name(),
                input: input.clone(),
            },
            Some(message) => LogEntry::Violated {
                constraint_id: constraint_id.to_string(),
                root: self.root.clone(),
                path: path.full_name(),
                input: input.clone(),
                args: message.args.clone(),
            },
        };
        self.log(entry);
    }

    /// Runs `f` with `segments` appended to the current path, restoring the
    /// path afterwards.
    pub(crate) fn scoped<U>(
        &mut self,
        segments: impl IntoIterator<Item = PathSegment>,
        f: impl FnOnce(&mut Self) -> U,
    ) -> U {
        let inner = segments
            .into_iter()
            .fold(self.path.clone(), |path, segment| path.push(segment));
        let outer = mem::replace(&mut self.path, inner);
        let result = f(self);
        self.path = outer;
        result
    }

    pub(crate) fn into_messages(self) -> Vec<Message> {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Check;
    use crate::log::LogRecorder;

    fn positive() -> Check<i64> {
        Check::new("test.positive", |n: &i64| *n > 0)
    }

    #[test]
    fn test_check_records_violation_at_current_path() {
        let mut cx = Context::new(Config::new(), "Root");
        let result = cx.scoped([PathSegment::field("age")], |cx| cx.check(&-1i64, &positive()));

        assert_eq!(result, Ok(None));
        assert_eq!(cx.violation_count(), 1);
        assert_eq!(cx.sink[0].path.full_name(), "age");
        assert_eq!(cx.sink[0].root, "Root");
        assert!(cx.path().is_root());
    }

    #[test]
    fn test_check_returns_output_when_satisfied() {
        let mut cx = Context::new(Config::new(), "Root");
        assert_eq!(cx.check(&1i64, &positive()), Ok(Some(())));
        assert_eq!(cx.violation_count(), 0);
    }

    #[test]
    fn test_fail_fast_check_halts() {
        let mut cx = Context::new(Config::new().with_fail_fast(true), "Root");
        assert!(cx.check(&-1i64, &positive()).is_err());
        assert_eq!(cx.violation_count(), 1);
    }

    #[test]
    fn test_every_check_is_logged_once() {
        let recorder = LogRecorder::new();
        let mut cx = Context::new(Config::new().with_logger(recorder.logger()), "Root");

        let _ = cx.check(&1i64, &positive());
        let _ = cx.check(&-1i64, &positive());

        let entries = recorder.entries();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_violated());
        assert!(entries[1].is_violated());
        assert_eq!(entries[1].input(), &serde_json::json!(-1));
    }

    #[test]
    fn test_recorded_path_is_not_affected_by_later_descent() {
        let mut cx = Context::new(Config::new(), "Root");
        cx.scoped([PathSegment::field("a")], |cx| {
            let _ = cx.check(&-1i64, &positive());
        });
        cx.scoped([PathSegment::field("b")], |_| {});

        assert_eq!(cx.violation_count(), 1);
        assert_eq!(cx.sink[0].path.full_name(), "a");
    }

    #[test]
    fn test_report_relocates_under_current_path() {
        let mut cx = Context::new(Config::new(), "Root");
        let message = Message::new("custom", "bad").with_path(Path::from_field("inner"));
        let _ = cx.scoped([PathSegment::field("outer")], |cx| cx.report(message));

        assert_eq!(cx.sink[0].path.full_name(), "outer.inner");
    }
}
