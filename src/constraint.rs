//! Atomic constraints.
//!
//! A constraint is a pure function from an input and a read-only
//! [`ConstraintContext`] to a [`Verdict`]. This module provides the
//! [`Constraint`] trait every atomic constraint implements, plus two generic
//! implementations: [`Check`] for predicates and [`Convert`] for constraints
//! that parse or transform their input.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::{Clock, Config};
use crate::message::{Arg, Message};
use crate::path::Path;

/// The outcome of evaluating one constraint.
///
/// Predicates are satisfied with `()`. Conversions are satisfied with the
/// converted value.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<O = ()> {
    /// The constraint holds.
    Satisfied(O),
    /// The constraint does not hold.
    Violated(Message),
}

impl<O> Verdict<O> {
    /// Returns true if the constraint holds.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Verdict::Satisfied(_))
    }

    /// Returns true if the constraint does not hold.
    pub fn is_violated(&self) -> bool {
        matches!(self, Verdict::Violated(_))
    }

    /// Maps the satisfied value.
    pub fn map<P>(self, f: impl FnOnce(O) -> P) -> Verdict<P> {
        match self {
            Verdict::Satisfied(value) => Verdict::Satisfied(f(value)),
            Verdict::Violated(message) => Verdict::Violated(message),
        }
    }
}

/// Read-only view of the validation context handed to a constraint.
pub struct ConstraintContext<'a> {
    pub(crate) root: &'a str,
    pub(crate) path: &'a Path,
    pub(crate) input: &'a Value,
    pub(crate) config: &'a Config,
}

impl<'a> ConstraintContext<'a> {
    /// Returns the root identifier of the current run.
    pub fn root(&self) -> &str {
        self.root
    }

    /// Returns the path at which the constraint is evaluated.
    pub fn path(&self) -> &Path {
        self.path
    }

    /// Returns the evaluated input as captured for messages and logs.
    pub fn input(&self) -> &Value {
        self.input
    }

    /// Returns the configured clock.
    pub fn clock(&self) -> &dyn Clock {
        self.config.clock()
    }

    /// Builds a violation message pre-filled with root, path and input.
    pub fn violation(&self, constraint_id: impl Into<String>, text: impl Into<String>) -> Message {
        Message::new(constraint_id, text)
            .with_root(self.root)
            .with_path(self.path.clone())
            .with_input(self.input.clone())
    }
}

/// An atomic constraint over inputs of type `T`.
///
/// Implementations must be pure: the verdict depends only on `input` and the
/// context. Violations are reported as data through [`Verdict::Violated`],
/// usually built with [`ConstraintContext::violation`].
///
/// # Example
///
/// ```rust
/// use kova::{Constraint, ConstraintContext, Verdict};
///
/// struct Even;
///
/// impl Constraint<i64> for Even {
///     type Output = ();
///
///     fn id(&self) -> &str {
///         "app.even"
///     }
///
///     fn evaluate(&self, input: &i64, cx: &ConstraintContext<'_>) -> Verdict {
///         if input % 2 == 0 {
///             Verdict::Satisfied(())
///         } else {
///             Verdict::Violated(cx.violation(self.id(), "must be even"))
///         }
///     }
/// }
/// ```
pub trait Constraint<T: ?Sized> {
    /// The value produced when the constraint holds.
    type Output;

    /// Returns the stable identifier of this constraint.
    fn id(&self) -> &str;

    /// Evaluates the constraint.
    fn evaluate(&self, input: &T, cx: &ConstraintContext<'_>) -> Verdict<Self::Output>;
}

/// Captures an input for messages and log entries.
pub(crate) fn input_value<T: Serialize + ?Sized>(input: &T) -> Value {
    serde_json::to_value(input).unwrap_or_else(|err| Value::String(format!("<{}>", err)))
}

type TestFn<T> = Arc<dyn Fn(&T, &ConstraintContext<'_>) -> bool + Send + Sync>;
type ConvertFn<T, U> = Arc<dyn Fn(&T) -> Option<U> + Send + Sync>;
type TextFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

fn default_text<T: ?Sized>(id: &str) -> TextFn<T> {
    let text = format!("constraint '{}' is not satisfied", id);
    Arc::new(move |_: &T| text.clone())
}

/// A predicate constraint.
///
/// # Example
///
/// ```rust
/// use kova::{try_validate, Check, Config};
///
/// let even = Check::new("app.even", |n: &i64| n % 2 == 0)
///     .text(|n| format!("{} must be even", n));
///
/// let result = try_validate(&Config::new(), |cx| {
///     cx.check(&3i64, &even)?;
///     Ok(())
/// });
///
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.first().text, "3 must be even");
/// ```
pub struct Check<T: ?Sized> {
    id: Cow<'static, str>,
    test: TestFn<T>,
    text: TextFn<T>,
    args: Vec<Value>,
}

impl<T: ?Sized> Check<T> {
    /// Creates a predicate constraint from a plain test.
    pub fn new<F>(id: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::with_context(id, move |input: &T, _: &ConstraintContext<'_>| test(input))
    }

    /// Creates a predicate constraint whose test also reads the context
    /// (for example the configured clock).
    pub fn with_context<F>(id: impl Into<Cow<'static, str>>, test: F) -> Self
    where
        F: Fn(&T, &ConstraintContext<'_>) -> bool + Send + Sync + 'static,
    {
        let id = id.into();
        let text = default_text(&id);
        Self {
            id,
            test: Arc::new(test),
            text,
            args: Vec::new(),
        }
    }

    /// Renders the violation text from the offending input.
    pub fn text<F>(mut self, text: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.text = Arc::new(text);
        self
    }

    /// Replaces the violation text with a fixed message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.text = Arc::new(move |_: &T| message.clone());
        self
    }

    /// Appends an argument reported with violations.
    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl<T: ?Sized> Constraint<T> for Check<T> {
    type Output = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn evaluate(&self, input: &T, cx: &ConstraintContext<'_>) -> Verdict {
        if (self.test)(input, cx) {
            Verdict::Satisfied(())
        } else {
            Verdict::Violated(
                cx.violation(self.id.as_ref(), (self.text)(input))
                    .with_args(self.args.iter().cloned().map(Arg::Value).collect()),
            )
        }
    }
}

impl<T: ?Sized> Clone for Check<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            test: Arc::clone(&self.test),
            text: Arc::clone(&self.text),
            args: self.args.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Check<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("id", &self.id)
            .field("args", &self.args)
            .finish()
    }
}

/// A constraint that converts its input, satisfied with the converted value.
///
/// # Example
///
/// ```rust
/// use kova::{try_validate, Config, Convert};
///
/// let port = Convert::new("app.port", |s: &str| s.parse::<u16>().ok());
///
/// let result = try_validate(&Config::new(), |cx| Ok(cx.check("8080", &port)?));
/// assert_eq!(result.into_result().unwrap(), Some(8080));
/// ```
pub struct Convert<T: ?Sized, U> {
    id: Cow<'static, str>,
    convert: ConvertFn<T, U>,
    text: TextFn<T>,
    args: Vec<Value>,
}

impl<T: ?Sized, U> Convert<T, U> {
    /// Creates a conversion constraint. `None` from `convert` is a violation.
    pub fn new<F>(id: impl Into<Cow<'static, str>>, convert: F) -> Self
    where
        F: Fn(&T) -> Option<U> + Send + Sync + 'static,
    {
        let id = id.into();
        let text = default_text(&id);
        Self {
            id,
            convert: Arc::new(convert),
            text,
            args: Vec::new(),
        }
    }

    /// Renders the violation text from the offending input.
    pub fn text<F>(mut self, text: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.text = Arc::new(text);
        self
    }

    /// Replaces the violation text with a fixed message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.text = Arc::new(move |_: &T| message.clone());
        self
    }

    /// Appends an argument reported with violations.
    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl<T: ?Sized, U> Constraint<T> for Convert<T, U> {
    type Output = U;

    fn id(&self) -> &str {
        &self.id
    }

    fn evaluate(&self, input: &T, cx: &ConstraintContext<'_>) -> Verdict<U> {
        match (self.convert)(input) {
            Some(value) => Verdict::Satisfied(value),
            None => Verdict::Violated(
                cx.violation(self.id.as_ref(), (self.text)(input))
                    .with_args(self.args.iter().cloned().map(Arg::Value).collect()),
            ),
        }
    }
}

impl<T: ?Sized, U> Clone for Convert<T, U> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            convert: Arc::clone(&self.convert),
            text: Arc::clone(&self.text),
            args: self.args.clone(),
        }
    }
}

impl<T: ?Sized, U> fmt::Debug for Convert<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Convert")
            .field("id", &self.id)
            .field("args", &self.args)
            .finish()
    }
}
