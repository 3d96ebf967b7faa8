//! Character sequence constraints.
//!
//! Lengths count Unicode scalar values, not bytes.

use regex::Regex;

use crate::constraint::Check;

/// Id of [`not_blank`].
pub const NOT_BLANK: &str = "kova.charSequence.notBlank";
/// Id of [`not_empty`].
pub const NOT_EMPTY: &str = "kova.charSequence.notEmpty";
/// Id of [`length`].
pub const LENGTH: &str = "kova.charSequence.length";
/// Id of [`min_length`].
pub const MIN_LENGTH: &str = "kova.charSequence.min";
/// Id of [`max_length`].
pub const MAX_LENGTH: &str = "kova.charSequence.max";
/// Id of [`pattern`].
pub const MATCHES: &str = "kova.charSequence.matches";
/// Id of [`starts_with`].
pub const STARTS_WITH: &str = "kova.charSequence.startsWith";

/// The input contains at least one non-whitespace character.
pub fn not_blank() -> Check<str> {
    Check::new(NOT_BLANK, |s: &str| !s.trim().is_empty()).message("must not be blank")
}

/// The input is not empty.
pub fn not_empty() -> Check<str> {
    Check::new(NOT_EMPTY, |s: &str| !s.is_empty()).message("must not be empty")
}

/// The input has exactly `length` characters.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, try_validate, Config};
///
/// let messages = try_validate(&Config::new(), |cx| cx.check("4567", &chars::length(3)))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(messages.first().text, "length must be 3, got 4");
/// ```
pub fn length(length: usize) -> Check<str> {
    Check::new(LENGTH, move |s: &str| s.chars().count() == length)
        .text(move |s| format!("length must be {}, got {}", length, s.chars().count()))
        .arg(length)
}

/// The input has at least `min` characters.
pub fn min_length(min: usize) -> Check<str> {
    Check::new(MIN_LENGTH, move |s: &str| s.chars().count() >= min)
        .text(move |s| format!("length must be at least {}, got {}", min, s.chars().count()))
        .arg(min)
}

/// The input has at most `max` characters.
pub fn max_length(max: usize) -> Check<str> {
    Check::new(MAX_LENGTH, move |s: &str| s.chars().count() <= max)
        .text(move |s| format!("length must be at most {}, got {}", max, s.chars().count()))
        .arg(max)
}

/// The whole input matches `pattern`.
///
/// # Errors
///
/// Returns the regex error if `pattern` does not compile.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, try_validate, Config};
///
/// let slug = chars::pattern(r"[a-z]+(-[a-z]+)*").unwrap();
///
/// assert!(try_validate(&Config::new(), |cx| cx.check("hello-world", &slug)).is_success());
/// assert!(try_validate(&Config::new(), |cx| cx.check("Hello world", &slug)).is_failure());
/// ```
pub fn pattern(pattern: &str) -> Result<Check<str>, regex::Error> {
    let regex = Regex::new(&format!("^(?:{})$", pattern))?;
    Ok(Check::new(MATCHES, move |s: &str| regex.is_match(s))
        .message(format!("must match pattern '{}'", pattern))
        .arg(pattern))
}

/// The input starts with `prefix`.
pub fn starts_with(prefix: impl Into<String>) -> Check<str> {
    let prefix = prefix.into();
    let expected = prefix.clone();
    Check::new(STARTS_WITH, move |s: &str| s.starts_with(expected.as_str()))
        .message(format!("must start with '{}'", prefix))
        .arg(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::try_validate;

    fn violated(input: &str, check: &Check<str>) -> Option<String> {
        try_validate(&Config::new(), |cx| cx.check(input, check))
            .into_result()
            .err()
            .map(|messages| messages.first().text.clone())
    }

    #[test]
    fn test_not_blank() {
        assert_eq!(violated("a", &not_blank()), None);
        assert_eq!(violated(" \t", &not_blank()).as_deref(), Some("must not be blank"));
        assert!(violated("", &not_blank()).is_some());
    }

    #[test]
    fn test_not_empty_accepts_whitespace() {
        assert_eq!(violated(" ", &not_empty()), None);
        assert!(violated("", &not_empty()).is_some());
    }

    #[test]
    fn test_lengths_count_chars() {
        assert_eq!(violated("äöü", &length(3)), None);
        assert_eq!(
            violated("ab", &min_length(3)).as_deref(),
            Some("length must be at least 3, got 2")
        );
        assert_eq!(
            violated("abcd", &max_length(3)).as_deref(),
            Some("length must be at most 3, got 4")
        );
    }

    #[test]
    fn test_pattern_is_anchored() {
        let digits = pattern(r"\d+").unwrap();
        assert_eq!(violated("123", &digits), None);
        assert!(violated("a123", &digits).is_some());
        assert!(pattern("(").is_err());
    }

    #[test]
    fn test_starts_with_and_custom_message() {
        let https = starts_with("https://").message("must be a secure url");
        assert_eq!(violated("https://x", &https), None);
        assert_eq!(
            violated("http://x", &https).as_deref(),
            Some("must be a secure url")
        );
    }
}
