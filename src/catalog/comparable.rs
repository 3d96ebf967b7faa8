//! Ordering constraints for any `PartialOrd` value.

use std::fmt::Display;

use serde::Serialize;

use crate::constraint::{input_value, Check};

/// Id of [`min`].
pub const MIN: &str = "kova.comparable.min";
/// Id of [`max`].
pub const MAX: &str = "kova.comparable.max";
/// Id of [`greater_than`].
pub const GREATER_THAN: &str = "kova.comparable.gt";
/// Id of [`less_than`].
pub const LESS_THAN: &str = "kova.comparable.lt";

/// Bounds accepted by the ordering constraints.
pub trait Bound: PartialOrd + Display + Serialize + Clone + Send + Sync + 'static {}

impl<T> Bound for T where T: PartialOrd + Display + Serialize + Clone + Send + Sync + 'static {}

fn ordering<T, P>(id: &'static str, bound: T, relation: &'static str, holds: P) -> Check<T>
where
    T: Bound,
    P: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    let arg = input_value(&bound);
    let shown = bound.clone();
    Check::new(id, move |value: &T| holds(value, &bound))
        .text(move |value| format!("must be {} {}, got {}", relation, shown, value))
        .arg(arg)
}

/// The input is greater than or equal to `min`.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::comparable, try_validate, Config};
///
/// let messages = try_validate(&Config::new(), |cx| cx.check(&17, &comparable::min(18)))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(messages.first().text, "must be at least 18, got 17");
/// ```
pub fn min<T: Bound>(min: T) -> Check<T> {
    ordering(MIN, min, "at least", |value, bound| value >= bound)
}

/// The input is less than or equal to `max`.
pub fn max<T: Bound>(max: T) -> Check<T> {
    ordering(MAX, max, "at most", |value, bound| value <= bound)
}

/// The input is strictly greater than `bound`.
pub fn greater_than<T: Bound>(bound: T) -> Check<T> {
    ordering(GREATER_THAN, bound, "greater than", |value, bound| value > bound)
}

/// The input is strictly less than `bound`.
pub fn less_than<T: Bound>(bound: T) -> Check<T> {
    ordering(LESS_THAN, bound, "less than", |value, bound| value < bound)
}
