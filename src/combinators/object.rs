//! Declarative object rules.
//!
//! An [`ObjectRule`] describes how to validate one type: its named fields in
//! declaration order, nested [`Validatable`] fields and cross-field
//! correlations evaluated after the fields.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::combinators::{Correlation, Rule, Validatable};
use crate::context::Context;
use crate::session::Step;

type FieldFn<T> = Arc<dyn Fn(&T, &mut Context) -> Step<()> + Send + Sync>;
type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A rule for a whole object.
///
/// Fields are kept in insertion order; declaring a field name twice replaces
/// the earlier rule in place. Correlations run after every field, in the
/// order they were added.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::{chars, comparable}, try_validate, Config, ObjectRule};
///
/// struct Signup {
///     name: String,
///     age: i64,
///     password: String,
///     confirmation: String,
/// }
///
/// let rule = ObjectRule::new()
///     .field("name", |s: &Signup| s.name.as_str(), chars::not_blank())
///     .field("age", |s: &Signup| &s.age, comparable::min(18i64))
///     .correlate(
///         kova::Correlation::new("signup.passwordsMatch", "passwords do not match"),
///         |s: &Signup| s.password == s.confirmation,
///     );
///
/// let signup = Signup {
///     name: String::new(),
///     age: 30,
///     password: "a".into(),
///     confirmation: "b".into(),
/// };
///
/// let messages = try_validate(&Config::new(), |cx| cx.apply(&signup, &rule))
///     .into_result()
///     .unwrap_err();
/// let ids: Vec<_> = messages.iter().map(|m| m.constraint_id.as_str()).collect();
/// assert_eq!(ids, vec!["kova.charSequence.notBlank", "signup.passwordsMatch"]);
/// ```
pub struct ObjectRule<T: ?Sized> {
    fields: IndexMap<String, FieldFn<T>>,
    correlations: Vec<(Correlation, PredicateFn<T>)>,
}

impl<T: ?Sized + 'static> ObjectRule<T> {
    /// Creates an empty object rule.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            correlations: Vec::new(),
        }
    }

    /// Validates the property selected by `accessor` with `rule`.
    pub fn field<U, A, R>(mut self, name: impl Into<String>, accessor: A, rule: R) -> Self
    where
        U: ?Sized + 'static,
        A: for<'a> Fn(&'a T) -> &'a U + Send + Sync + 'static,
        R: Rule<U> + 'static,
    {
        let validate = move |value: &T, cx: &mut Context| rule.apply(accessor(value), cx);
        self.fields.insert(name.into(), Arc::new(validate));
        self
    }

    /// Validates the nested object selected by `accessor`.
    pub fn nested<V, A>(mut self, name: impl Into<String>, accessor: A) -> Self
    where
        V: Validatable + ?Sized + 'static,
        A: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        let validate = move |value: &T, cx: &mut Context| accessor(value).validate(cx);
        self.fields.insert(name.into(), Arc::new(validate));
        self
    }

    /// Adds a cross-field correlation that holds when `predicate` returns true.
    pub fn correlate<P>(mut self, correlation: Correlation, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.correlations.push((correlation, Arc::new(predicate)));
        self
    }

    /// Returns the declared field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<T: ?Sized + 'static> Default for ObjectRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Rule<T> for ObjectRule<T> {
    fn apply(&self, input: &T, cx: &mut Context) -> Step<()> {
        for (name, validate) in &self.fields {
            cx.field(name.as_str(), |cx| validate(input, cx))?;
        }
        for (correlation, predicate) in &self.correlations {
            cx.correlate(correlation.clone(), predicate(input))?;
        }
        Ok(())
    }
}

impl<T: ?Sized> Clone for ObjectRule<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            correlations: self.correlations.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ObjectRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRule")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field(
                "correlations",
                &self
                    .correlations
                    .iter()
                    .map(|(c, _)| c.id())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
