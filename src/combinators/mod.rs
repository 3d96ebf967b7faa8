//! Composable rules.
//!
//! A [`Rule`] is a reusable validation step over inputs of type `T`. Atomic
//! [`Check`] and [`Convert`] constraints are rules; the types in this module
//! compose them:
//!
//! - [`And`]: every rule, in declared order
//! - [`Or`]: the first satisfied branch wins, otherwise one `kova.or` message
//! - [`Each`], [`EachKey`], [`EachValue`]: a rule applied per element
//! - [`ObjectRule`]: named fields, nested values and correlations of one type
//!
//! The same compositions are available imperatively on [`Context`]
//! (`field`, `or`, `on_each`, `correlate`, ...), which is what the rules use
//! internally.
//!
//! # Example
//!
//! ```rust
//! use kova::{catalog::chars, try_validate, Config, Rule};
//!
//! let code = chars::length(3).or(chars::length(5));
//!
//! let result = try_validate(&Config::new(), |cx| {
//!     cx.apply("1234", &code)?;
//!     Ok(())
//! });
//!
//! let messages = result.into_result().unwrap_err();
//! assert_eq!(messages.first().constraint_id, "kova.or");
//! assert_eq!(messages.first().nested().count(), 2);
//! ```

mod and;
mod correlation;
mod each;
mod nested;
mod object;
mod or;

use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use serde::Serialize;

use crate::constraint::{Check, Convert};
use crate::context::Context;
use crate::session::Step;

pub use and::And;
pub use correlation::Correlation;
pub use each::{Each, EachKey, EachValue};
pub use nested::Validatable;
pub use object::ObjectRule;
pub use or::{Or, OrChain};

/// A validation step that can be stored, shared and composed.
///
/// `Send + Sync` is required so composed rules can live in statics and be
/// used from concurrent sessions.
pub trait Rule<T: ?Sized>: Send + Sync {
    /// Validates `input` against `cx`.
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()>;

    /// Combines this rule with `other`; both are evaluated in order.
    fn and<R>(self, other: R) -> And<T>
    where
        Self: Sized + 'static,
        R: Rule<T> + 'static,
    {
        And::new().with(self).with(other)
    }

    /// Combines this rule with `other` as alternatives.
    fn or<R>(self, other: R) -> Or<T>
    where
        Self: Sized + 'static,
        R: Rule<T> + 'static,
    {
        Or::new(self).or_else(other)
    }
}

impl Context {
    /// Applies `rule` to `input` at the current path.
    pub fn apply<T, R>(&mut self, input: &T, rule: &R) -> Step<()>
    where
        T: ?Sized,
        R: Rule<T> + ?Sized,
    {
        rule.apply(input, self)
    }
}

impl<T: Serialize + ?Sized> Rule<T> for Check<T> {
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        cx.check(input, self).map(drop)
    }
}

impl<T: Serialize + ?Sized, U> Rule<T> for Convert<T, U> {
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        cx.check(input, self).map(drop)
    }
}

impl<T: ?Sized> Rule<T> for Box<dyn Rule<T>> {
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        (**self).apply(input, cx)
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for Arc<R> {
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        (**self).apply(input, cx)
    }
}

/// A rule backed by a function.
///
/// Created with [`rule`].
pub struct FnRule<F> {
    f: F,
}

/// Wraps a validating function into a [`Rule`].
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, rule, try_validate, Config, Context, Rule};
///
/// let username = rule(|name: &str, cx: &mut Context| {
///     cx.check(name, &chars::not_blank())?;
///     cx.check(name, &chars::max_length(16))?;
///     Ok(())
/// });
///
/// let result = try_validate(&Config::new(), |cx| cx.apply("alice", &username));
/// assert!(result.is_success());
/// ```
pub fn rule<T, F>(f: F) -> FnRule<F>
where
    T: ?Sized,
    F: Fn(&T, &mut Context) -> Step<()> + Send + Sync,
{
    FnRule { f }
}

impl<T, F> Rule<T> for FnRule<F>
where
    T: ?Sized,
    F: Fn(&T, &mut Context) -> Step<()> + Send + Sync,
{
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        (self.f)(input, cx)
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnRule(<fn>)")
    }
}

impl<T, R> Add<R> for Check<T>
where
    T: Serialize + ?Sized + 'static,
    R: Rule<T> + 'static,
{
    type Output = And<T>;

    fn add(self, other: R) -> And<T> {
        Rule::and(self, other)
    }
}

impl<T, U, R> Add<R> for Convert<T, U>
where
    T: Serialize + ?Sized + 'static,
    U: 'static,
    R: Rule<T> + 'static,
{
    type Output = And<T>;

    fn add(self, other: R) -> And<T> {
        Rule::and(self, other)
    }
}

impl<T, R> Add<R> for And<T>
where
    T: ?Sized + 'static,
    R: Rule<T> + 'static,
{
    type Output = And<T>;

    fn add(self, other: R) -> And<T> {
        self.with(other)
    }
}

impl<T, R> Add<R> for Or<T>
where
    T: ?Sized + 'static,
    R: Rule<T> + 'static,
{
    type Output = And<T>;

    fn add(self, other: R) -> And<T> {
        Rule::and(self, other)
    }
}
