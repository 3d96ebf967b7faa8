//! Scoped descent into properties, positions and nested objects.

use std::fmt::Display;

use stillwater::Validation;

use crate::context::Context;
use crate::path::PathSegment;
use crate::session::{Outcome, Step};

/// A type that knows how to validate itself.
///
/// Implementations describe their own properties relative to wherever they
/// are validated; [`Context::nested`] places them under a named property.
/// Mutually referencing types are allowed, but an implementation must not
/// follow a reference cycle without bound.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::chars, try_validate, Config, Context, Step, Validatable};
///
/// struct Name {
///     value: String,
/// }
///
/// impl Validatable for Name {
///     fn validate(&self, cx: &mut Context) -> Step<()> {
///         cx.field("value", |cx| cx.check(self.value.as_str(), &chars::not_blank()))?;
///         Ok(())
///     }
/// }
///
/// struct FullName {
///     first: Name,
///     last: Name,
/// }
///
/// impl Validatable for FullName {
///     fn validate(&self, cx: &mut Context) -> Step<()> {
///         cx.nested("first", &self.first)?;
///         cx.nested("last", &self.last)
///     }
/// }
///
/// let name = FullName {
///     first: Name { value: String::new() },
///     last: Name { value: " ".to_string() },
/// };
///
/// let messages = try_validate(&Config::new(), |cx| cx.nested("fullName", &name))
///     .into_result()
///     .unwrap_err();
///
/// let paths: Vec<_> = messages.iter().map(|m| m.path.full_name()).collect();
/// assert_eq!(paths, vec!["fullName.first.value", "fullName.last.value"]);
/// ```
pub trait Validatable {
    /// Validates `self` relative to the current path of `cx`.
    fn validate(&self, cx: &mut Context) -> Step<()>;
}

impl<V: Validatable + ?Sized> Validatable for &V {
    fn validate(&self, cx: &mut Context) -> Step<()> {
        (**self).validate(cx)
    }
}

impl<V: Validatable> Validatable for Box<V> {
    fn validate(&self, cx: &mut Context) -> Step<()> {
        (**self).validate(cx)
    }
}

impl<V: Validatable> Validatable for Option<V> {
    fn validate(&self, cx: &mut Context) -> Step<()> {
        match self {
            Some(value) => value.validate(cx),
            None => Ok(()),
        }
    }
}

impl Context {
    /// Runs `f` under the named property.
    pub fn field<U, F>(&mut self, name: impl Into<String>, f: F) -> Step<U>
    where
        F: FnOnce(&mut Context) -> Step<U>,
    {
        self.scoped([PathSegment::field(name)], f)
    }

    /// Runs `f` under a positional segment `[index]`.
    pub fn index<U, F>(&mut self, index: usize, f: F) -> Step<U>
    where
        F: FnOnce(&mut Context) -> Step<U>,
    {
        self.scoped([PathSegment::index(index)], f)
    }

    /// Runs `f` under a map key segment `[key]`.
    pub fn key<U, F>(&mut self, key: impl Display, f: F) -> Step<U>
    where
        F: FnOnce(&mut Context) -> Step<U>,
    {
        self.scoped([PathSegment::key(key.to_string())], f)
    }

    /// Validates a nested object under the named property.
    pub fn nested<V>(&mut self, name: impl Into<String>, value: &V) -> Step<()>
    where
        V: Validatable + ?Sized,
    {
        self.field(name, |cx| value.validate(cx))
    }

    /// Adopts the outcome of a separate validation run under the named
    /// property.
    ///
    /// On failure each message is relocated below the current path and the
    /// property, and recorded in order. The value of a successful run is
    /// returned as `Some`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{catalog::parse, try_validate, Config};
    ///
    /// let port = try_validate(&Config::new(), |cx| cx.field("port", |cx| cx.check("http", &parse::int())));
    ///
    /// let messages = try_validate(&Config::new(), |cx| cx.embed("server", port))
    ///     .into_result()
    ///     .unwrap_err();
    /// assert_eq!(messages.first().path.full_name(), "server.port");
    /// ```
    pub fn embed<U>(&mut self, name: impl Into<String>, outcome: Outcome<U>) -> Step<Option<U>> {
        match outcome {
            Validation::Success(value) => Ok(Some(value)),
            Validation::Failure(messages) => {
                let prefix = self.path().push_field(name);
                for message in messages {
                    let message = message.relocate(&prefix).with_root(self.root());
                    self.record(message)?;
                }
                Ok(None)
            }
        }
    }
}
