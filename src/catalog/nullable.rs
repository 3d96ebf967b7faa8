//! Presence constraints for optional values.

use crate::constraint::{Check, Convert};

/// Id of [`not_null`].
pub const NOT_NULL: &str = "kova.nullable.notNull";
/// Id of [`is_null`].
pub const NULL: &str = "kova.nullable.null";

/// The value is present; yields a clone of it.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::nullable, try_validate, Config};
///
/// let nickname: Option<String> = Some("kova".to_string());
/// let result = try_validate(&Config::new(), |cx| cx.check(&nickname, &nullable::not_null()));
/// assert_eq!(result.into_result().unwrap(), Some("kova".to_string()));
/// ```
pub fn not_null<T: Clone + Send + Sync + 'static>() -> Convert<Option<T>, T> {
    Convert::new(NOT_NULL, |value: &Option<T>| value.clone()).message("must not be null")
}

/// The value is absent.
pub fn is_null<T: 'static>() -> Check<Option<T>> {
    Check::new(NULL, |value: &Option<T>| value.is_none()).message("must be null")
}
