//! Constructor argument validation.
//!
//! Factories validate each constructor argument under the parameter's name
//! and only build the value when every argument passed. Arguments whose name
//! is unknown are reported under a synthetic `param{position}` label.
//!
//! # Example
//!
//! ```rust
//! use kova::{catalog::{chars, parse}, Config, Session};
//!
//! #[derive(Debug)]
//! struct Port {
//!     host: String,
//!     number: i64,
//! }
//!
//! let outcome = Session::new(Config::new()).construct(
//!     |cx| {
//!         cx.arg(0, Some("host"), |cx| cx.check("", &chars::not_blank()))?;
//!         let number = cx.arg(1, None, |cx| cx.check("x", &parse::int()))?;
//!         Ok(("".to_string(), number.unwrap_or_default()))
//!     },
//!     |(host, number)| Port { host, number },
//! );
//!
//! let messages = outcome.into_result().unwrap_err();
//! let paths: Vec<_> = messages.iter().map(|m| m.path.full_name()).collect();
//! assert_eq!(paths, vec!["host", "param1"]);
//! assert_eq!(messages.first().root, "Port");
//! ```

use crate::context::Context;
use crate::path::PathSegment;
use crate::session::Step;

/// Returns the path label of a constructor parameter.
pub fn param_label(position: usize, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("param{}", position),
    }
}

impl Context {
    /// Runs `f` under the label of the constructor parameter at `position`.
    ///
    /// `position` is zero-based. An absent or empty `name` falls back to
    /// `param{position}`.
    pub fn arg<U, F>(&mut self, position: usize, name: Option<&str>, f: F) -> Step<U>
    where
        F: FnOnce(&mut Context) -> Step<U>,
    {
        self.scoped([PathSegment::field(param_label(position, name))], f)
    }
}
