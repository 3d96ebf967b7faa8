//! Validation runs.
//!
//! A [`Session`] owns one run: it creates a fresh [`Context`], executes the
//! validation block against it and turns the recorded messages into an
//! [`Outcome`]. The accumulate-or-stop policy lives here as well, in
//! `Context::record`, together with the isolated sub-accumulations used by
//! disjunctions and per-element checks.

use std::mem;

use stillwater::Validation;

use crate::combinators::Validatable;
use crate::config::Config;
use crate::context::Context;
use crate::error::ValidationError;
use crate::message::{Message, Messages};

/// Marker returned when a fail-fast run stops after recording a violation.
///
/// A `Halt` is only ever produced right after a message was recorded, so the
/// run it aborts always ends in failure. It cannot be constructed outside
/// this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    _private: (),
}

/// The result of one validation step: `Err(Halt)` stops the remaining steps
/// of a fail-fast run.
pub type Step<T> = Result<T, Halt>;

/// The non-throwing result of a validation run.
pub type Outcome<T> = Validation<T, Messages>;

impl Context {
    /// Records a violation and decides whether the run continues.
    pub(crate) fn record(&mut self, message: Message) -> Step<()> {
        self.sink.push(message);
        if self.is_fail_fast() {
            Err(Halt { _private: () })
        } else {
            Ok(())
        }
    }

    /// Runs `f` against an isolated message sink.
    ///
    /// Returns the produced value if `f` completed without recording anything,
    /// otherwise every message it recorded. Nothing reaches the outer sink.
    pub(crate) fn capture<U>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Step<U>,
    ) -> Result<U, Vec<Message>> {
        let outer = mem::take(&mut self.sink);
        let result = f(self);
        let inner = mem::replace(&mut self.sink, outer);
        match result {
            Ok(value) if inner.is_empty() => Ok(value),
            _ => Err(inner),
        }
    }
}

/// One top-level validation run.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, Config, Session};
///
/// let session = Session::new(Config::new().with_fail_fast(true)).root("Signup");
///
/// let result = session.try_validate(|cx| {
///     cx.field("name", |cx| cx.check("", &chars::not_blank()))?;
///     cx.field("email", |cx| cx.check("", &chars::not_blank()))?;
///     Ok(())
/// });
///
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages.first().root, "Signup");
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    root: Option<String>,
}

impl Session {
    /// Creates a session with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config, root: None }
    }

    /// Sets the root identifier reported in messages and log entries.
    ///
    /// Defaults to the short type name of the validated value, or of the
    /// block's output. Blocks producing `()` report `(root)`.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Runs `block` and returns its value, or every recorded message.
    pub fn try_validate<T, F>(&self, block: F) -> Outcome<T>
    where
        F: FnOnce(&mut Context) -> Step<T>,
    {
        let root = self.root.clone().unwrap_or_else(default_root::<T>);
        let mut cx = Context::new(self.config.clone(), root.clone());
        let result = block(&mut cx);
        let messages = cx.into_messages();

        tracing::debug!(
            root = %root,
            violations = messages.len(),
            fail_fast = self.config.is_fail_fast(),
            "validation finished"
        );

        match Messages::from_vec(messages) {
            Some(messages) => Validation::Failure(messages),
            None => match result {
                Ok(value) => Validation::Success(value),
                Err(_) => panic!("validation of '{}' halted without recording a violation", root),
            },
        }
    }

    /// Validates `value` at the root path. The root identifier defaults to
    /// the short type name of `V`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{catalog::chars, Config, Context, Session, Step, Validatable};
    ///
    /// struct Tag(String);
    ///
    /// impl Validatable for Tag {
    ///     fn validate(&self, cx: &mut Context) -> Step<()> {
    ///         cx.field("value", |cx| cx.check(self.0.as_str(), &chars::not_blank()))?;
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let messages = Session::new(Config::new())
    ///     .try_validate_value(&Tag(String::new()))
    ///     .into_result()
    ///     .unwrap_err();
    /// assert_eq!(messages.first().root, "Tag");
    /// assert_eq!(messages.first().path.full_name(), "value");
    /// ```
    pub fn try_validate_value<V>(&self, value: &V) -> Outcome<()>
    where
        V: Validatable + ?Sized,
    {
        let session = match &self.root {
            Some(_) => self.clone(),
            None => self.clone().root(short_type_name::<V>()),
        };
        session.try_validate(|cx| value.validate(cx))
    }

    /// Runs `block` and returns its value, or a [`ValidationError`] carrying
    /// every recorded message.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if at least one violation was recorded.
    pub fn validate<T, F>(&self, block: F) -> Result<T, ValidationError>
    where
        F: FnOnce(&mut Context) -> Step<T>,
    {
        self.try_validate(block)
            .into_result()
            .map_err(ValidationError::new)
    }

    /// Validates constructor arguments with `bind` and invokes `constructor`
    /// only when no violation was recorded.
    pub fn construct<A, T, B, C>(&self, bind: B, constructor: C) -> Outcome<T>
    where
        B: FnOnce(&mut Context) -> Step<A>,
        C: FnOnce(A) -> T,
    {
        let session = match &self.root {
            Some(_) => self.clone(),
            None => self.clone().root(short_type_name::<T>()),
        };
        session.try_validate(bind).map(constructor)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::global().clone())
    }
}

/// Runs `block` with `config` and returns its value, or every recorded message.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, try_validate, Config};
///
/// let result = try_validate(&Config::new(), |cx| {
///     cx.field("first", |cx| cx.check("", &chars::not_blank()))?;
///     cx.field("last", |cx| cx.check(" ", &chars::not_blank()))?;
///     Ok(())
/// });
///
/// let messages = result.into_result().unwrap_err();
/// let paths: Vec<_> = messages.iter().map(|m| m.path.full_name()).collect();
/// assert_eq!(paths, vec!["first", "last"]);
/// ```
pub fn try_validate<T, F>(config: &Config, block: F) -> Outcome<T>
where
    F: FnOnce(&mut Context) -> Step<T>,
{
    Session::new(config.clone()).try_validate(block)
}

/// Runs `block` with `config` and returns its value, or a [`ValidationError`]
/// carrying every recorded message.
///
/// # Errors
///
/// Returns [`ValidationError`] if at least one violation was recorded.
pub fn validate<T, F>(config: &Config, block: F) -> Result<T, ValidationError>
where
    F: FnOnce(&mut Context) -> Step<T>,
{
    Session::new(config.clone()).validate(block)
}

/// Validates `value` with `config` at the root path, reporting the short type
/// name of `V` as the root identifier.
pub fn try_validate_value<V>(config: &Config, value: &V) -> Outcome<()>
where
    V: Validatable + ?Sized,
{
    Session::new(config.clone()).try_validate_value(value)
}

fn default_root<T: ?Sized>() -> String {
    if std::any::type_name::<T>() == "()" {
        "(root)".to_string()
    } else {
        short_type_name::<T>()
    }
}

fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
