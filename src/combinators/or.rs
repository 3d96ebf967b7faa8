//! Disjunction.
//!
//! Every branch runs against an isolated message sink. The first branch that
//! completes without recording anything satisfies the disjunction and the
//! remaining branches are skipped. When every branch fails, exactly one
//! composite message with id `kova.or` is recorded, carrying one message list
//! per branch in evaluation order.

use std::fmt;

use crate::combinators::Rule;
use crate::context::Context;
use crate::message::Message;
use crate::session::Step;

/// Constraint id of the composite message recorded when every branch fails.
pub const OR_ID: &str = "kova.or";

/// Alternative rules evaluated left to right.
///
/// Built with [`Rule::or`] and extended with [`Or::or_else`]. A branch that
/// is itself an `Or` reports its own `kova.or` message inside the outer one.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, try_validate, Config, Rule};
///
/// let code = chars::length(2).or(chars::length(3)).or_else(chars::starts_with("x"));
///
/// assert!(try_validate(&Config::new(), |cx| cx.apply("abc", &code)).is_success());
///
/// let messages = try_validate(&Config::new(), |cx| cx.apply("abcd", &code))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages.first().nested().count(), 3);
/// ```
pub struct Or<T: ?Sized> {
    branches: Vec<Box<dyn Rule<T>>>,
}

impl<T: ?Sized> Or<T> {
    /// Starts a disjunction with its leading branch.
    pub fn new<R>(first: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        Self {
            branches: vec![Box::new(first)],
        }
    }

    /// Appends an alternative branch.
    pub fn or_else<R>(mut self, branch: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        self.branches.push(Box::new(branch));
        self
    }

    /// Returns the number of branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Always false; a disjunction has a leading branch.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl<T: ?Sized> Rule<T> for Or<T> {
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        let mut failures = Vec::with_capacity(self.branches.len());
        for branch in &self.branches {
            match cx.capture(|cx| branch.apply(input, cx)) {
                Ok(()) => return Ok(()),
                Err(messages) => failures.push(messages),
            }
        }
        cx.record_disjunction(failures)
    }

    fn or<R>(self, other: R) -> Or<T>
    where
        Self: Sized + 'static,
        R: Rule<T> + 'static,
    {
        self.or_else(other)
    }
}

impl<T: ?Sized> fmt::Debug for Or<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Or")
            .field("branches", &self.branches.len())
            .finish()
    }
}

/// An imperative disjunction started with [`Context::or`].
///
/// Branches are closures over the context. The chain must be finished with
/// [`OrChain::end`], which records the composite message if no branch held.
#[must_use = "an OrChain records nothing until `end` is called"]
pub struct OrChain<'a, U> {
    cx: &'a mut Context,
    value: Option<U>,
    failures: Vec<Vec<Message>>,
}

impl<'a, U> OrChain<'a, U> {
    fn attempt<F>(&mut self, branch: F)
    where
        F: FnOnce(&mut Context) -> Step<U>,
    {
        if self.value.is_some() {
            return;
        }
        match self.cx.capture(branch) {
            Ok(value) => self.value = Some(value),
            Err(messages) => self.failures.push(messages),
        }
    }

    /// Adds an alternative. It is skipped if an earlier branch held.
    pub fn or_else<F>(mut self, branch: F) -> Self
    where
        F: FnOnce(&mut Context) -> Step<U>,
    {
        self.attempt(branch);
        self
    }

    /// Finishes the disjunction, returning the value of the satisfied branch.
    ///
    /// When every branch failed the composite message is recorded and
    /// `Ok(None)` is returned, or `Err(Halt)` in fail-fast mode.
    pub fn end(self) -> Step<Option<U>> {
        match self.value {
            Some(value) => Ok(Some(value)),
            None => {
                self.cx.record_disjunction(self.failures)?;
                Ok(None)
            }
        }
    }
}

impl Context {
    /// Starts a disjunction whose first branch is `branch`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{catalog::parse, try_validate, Config};
    ///
    /// let result = try_validate(&Config::new(), |cx| {
    ///     let flag = cx
    ///         .or(|cx| Ok(cx.check("yes", &parse::boolean())?.is_some_and(|b| b)))
    ///         .or_else(|cx| Ok(cx.check("yes", &parse::int())?.is_some_and(|n| n != 0)))
    ///         .end()?;
    ///     Ok(flag)
    /// });
    ///
    /// let messages = result.into_result().unwrap_err();
    /// assert_eq!(messages.first().constraint_id, "kova.or");
    /// ```
    pub fn or<U, F>(&mut self, branch: F) -> OrChain<'_, U>
    where
        F: FnOnce(&mut Context) -> Step<U>,
    {
        let mut chain = OrChain {
            cx: self,
            value: None,
            failures: Vec::new(),
        };
        chain.attempt(branch);
        chain
    }

    /// Records the composite message of a disjunction whose branches all
    /// failed. Branch messages keep the paths they were recorded at.
    pub(crate) fn record_disjunction(&mut self, failures: Vec<Vec<Message>>) -> Step<()> {
        let text = format!("none of the {} alternatives is satisfied", failures.len());
        let message = Message::composite(OR_ID, text, failures)
            .with_root(self.root())
            .with_path(self.path().clone());
        self.record(message)
    }
}
