//! Sequential conjunction.

use std::fmt;

use crate::combinators::Rule;
use crate::context::Context;
use crate::session::Step;

/// Rules evaluated in declared order.
///
/// In accumulate mode every rule runs and each violation is recorded. In
/// fail-fast mode the first violation stops the remaining rules. An empty
/// conjunction is satisfied.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, try_validate, And, Config};
///
/// let username = And::new()
///     .with(chars::not_blank())
///     .with(chars::min_length(3))
///     .with(chars::max_length(16));
///
/// let result = try_validate(&Config::new(), |cx| cx.apply(" ", &username));
/// assert_eq!(result.into_result().unwrap_err().len(), 2);
///
/// let fail_fast = Config::new().with_fail_fast(true);
/// let result = try_validate(&fail_fast, |cx| cx.apply(" ", &username));
/// assert_eq!(result.into_result().unwrap_err().len(), 1);
/// ```
pub struct And<T: ?Sized> {
    rules: Vec<Box<dyn Rule<T>>>,
}

impl<T: ?Sized> And<T> {
    /// Creates an empty conjunction.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    pub fn with<R>(mut self, rule: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: ?Sized> Default for And<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Rule<T> for And<T> {
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        for rule in &self.rules {
            rule.apply(input, cx)?;
        }
        Ok(())
    }

    fn and<R>(self, other: R) -> And<T>
    where
        Self: Sized + 'static,
        R: Rule<T> + 'static,
    {
        self.with(other)
    }
}

impl<T: ?Sized> fmt::Debug for And<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("And")
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constraint::Check;
    use crate::session::try_validate;

    fn at_least(n: i64) -> Check<i64> {
        Check::new(format!("test.atLeast{}", n), move |v: &i64| *v >= n)
    }

    #[test]
    fn test_empty_conjunction_is_satisfied() {
        let rule: And<i64> = And::new();
        assert!(try_validate(&Config::new(), |cx| cx.apply(&0i64, &rule)).is_success());
    }

    #[test]
    fn test_and_flattens() {
        let rule = at_least(1).and(at_least(2)).and(at_least(3));
        assert_eq!(rule.len(), 3);
    }

    #[test]
    fn test_accumulates_in_declared_order() {
        let rule = at_least(1).and(at_least(2)).and(at_least(3));
        let result = try_validate(&Config::new(), |cx| cx.apply(&1i64, &rule));

        let messages = result.into_result().unwrap_err();
        let ids: Vec<_> = messages.iter().map(|m| m.constraint_id.as_str()).collect();
        assert_eq!(ids, vec!["test.atLeast2", "test.atLeast3"]);
    }

    #[test]
    fn test_fail_fast_keeps_first_violation_only() {
        let rule = at_least(1).and(at_least(2)).and(at_least(3));
        let config = Config::new().with_fail_fast(true);
        let result = try_validate(&config, |cx| cx.apply(&0i64, &rule));

        let messages = result.into_result().unwrap_err();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages.first().constraint_id, "test.atLeast1");
    }
}
