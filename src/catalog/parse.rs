//! String conversions.
//!
//! Each constructor returns a [`Convert`] that yields the parsed value, so the
//! result of [`Context::check`](crate::Context::check) can be bound and used
//! by later steps.

use crate::constraint::Convert;

/// Id of [`int`].
pub const INT: &str = "kova.string.int";
/// Id of [`double`].
pub const DOUBLE: &str = "kova.string.double";
/// Id of [`boolean`].
pub const BOOLEAN: &str = "kova.string.boolean";

/// Parses a base-10 `i64`.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::parse, try_validate, Config};
///
/// let result = try_validate(&Config::new(), |cx| cx.field("start", |cx| cx.check("abc", &parse::int())));
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.first().constraint_id, "kova.string.int");
/// assert_eq!(messages.first().path.full_name(), "start");
/// ```
pub fn int() -> Convert<str, i64> {
    Convert::new(INT, |s: &str| s.parse::<i64>().ok())
        .text(|s| format!("'{}' is not a valid integer", s))
}

/// Parses a finite or non-finite `f64`.
pub fn double() -> Convert<str, f64> {
    Convert::new(DOUBLE, |s: &str| s.parse::<f64>().ok())
        .text(|s| format!("'{}' is not a valid number", s))
}

/// Parses exactly `true` or `false`.
pub fn boolean() -> Convert<str, bool> {
    Convert::new(BOOLEAN, |s: &str| match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    })
    .text(|s| format!("'{}' is not a valid boolean", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::try_validate;

    fn parsed<U>(input: &str, convert: &Convert<str, U>) -> Option<U> {
        try_validate(&Config::new(), |cx| cx.check(input, convert))
            .into_result()
            .ok()
            .flatten()
    }

    #[test]
    fn test_int() {
        assert_eq!(parsed("-42", &int()), Some(-42));
        assert_eq!(parsed("4.2", &int()), None);
        assert_eq!(parsed(" 1", &int()), None);
    }

    #[test]
    fn test_double() {
        assert_eq!(parsed("4.5", &double()), Some(4.5));
        assert_eq!(parsed("x", &double()), None);
    }

    #[test]
    fn test_boolean_is_strict() {
        assert_eq!(parsed("true", &boolean()), Some(true));
        assert_eq!(parsed("false", &boolean()), Some(false));
        assert_eq!(parsed("TRUE", &boolean()), None);
        assert_eq!(parsed("1", &boolean()), None);
    }

    #[test]
    fn test_violation_text() {
        let messages = try_validate(&Config::new(), |cx| cx.check("abc", &int()))
            .into_result()
            .unwrap_err();
        assert_eq!(messages.first().text, "'abc' is not a valid integer");
    }
}
