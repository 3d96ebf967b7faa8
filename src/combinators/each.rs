//! Per-element validation of collections, iterables and maps.
//!
//! Each element is validated against an isolated message sink under a
//! synthetic locator: `[i]<collection element>` for sequences,
//! `[i]<iterable element>` for iterators, `[key]<map key>` and
//! `[key]<map value>` for map entries. Failing elements are reported through
//! one composite message, never individually.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::combinators::Rule;
use crate::context::Context;
use crate::message::Message;
use crate::path::PathSegment;
use crate::session::Step;

/// Constraint id for per-element failures of an indexed collection.
pub const COLLECTION_EACH_ID: &str = "kova.collection.onEach";
/// Constraint id for per-element failures of an iterator.
pub const ITERABLE_EACH_ID: &str = "kova.iterable.onEach";
/// Constraint id for failing map keys.
pub const MAP_EACH_KEY_ID: &str = "kova.map.onEachKey";
/// Constraint id for failing map values.
pub const MAP_EACH_VALUE_ID: &str = "kova.map.onEachValue";

impl Context {
    /// Validates every element of a collection with `f`.
    ///
    /// In accumulate mode every element is visited; in fail-fast mode the
    /// first failing element stops the iteration. An empty collection is
    /// satisfied.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{catalog::chars, try_validate, Config};
    ///
    /// let codes = ["123", "4567", "8910"];
    ///
    /// let messages = try_validate(&Config::new(), |cx| {
    ///     cx.field("codes", |cx| {
    ///         cx.on_each(codes, |cx, code| cx.check(code, &chars::length(3)).map(drop))
    ///     })
    /// })
    /// .into_result()
    /// .unwrap_err();
    ///
    /// let composite = messages.first();
    /// assert_eq!(composite.constraint_id, "kova.collection.onEach");
    /// let elements: Vec<_> = composite.nested().map(|m| m[0].path.full_name()).collect();
    /// assert_eq!(
    ///     elements,
    ///     vec!["codes[1]<collection element>", "codes[2]<collection element>"]
    /// );
    /// ```
    pub fn on_each<I, F>(&mut self, elements: I, f: F) -> Step<()>
    where
        I: IntoIterator,
        F: FnMut(&mut Context, I::Item) -> Step<()>,
    {
        let located = elements.into_iter().enumerate().map(|(i, element)| {
            (
                [
                    PathSegment::index(i),
                    PathSegment::marker("collection element"),
                ],
                element,
            )
        });
        self.each_element(COLLECTION_EACH_ID, located, f)
    }

    /// Validates every element produced by an iterator with `f`.
    pub fn on_each_iter<I, F>(&mut self, elements: I, f: F) -> Step<()>
    where
        I: IntoIterator,
        F: FnMut(&mut Context, I::Item) -> Step<()>,
    {
        let located = elements.into_iter().enumerate().map(|(i, element)| {
            (
                [
                    PathSegment::index(i),
                    PathSegment::marker("iterable element"),
                ],
                element,
            )
        });
        self.each_element(ITERABLE_EACH_ID, located, f)
    }

    /// Validates every key of a map with `f`, in the map's iteration order.
    pub fn on_each_key<K, V, I, F>(&mut self, entries: I, f: F) -> Step<()>
    where
        K: Display,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&mut Context, K) -> Step<()>,
    {
        let located = entries.into_iter().map(|(key, _)| {
            (
                [
                    PathSegment::key(key.to_string()),
                    PathSegment::marker("map key"),
                ],
                key,
            )
        });
        self.each_element(MAP_EACH_KEY_ID, located, f)
    }

    /// Validates every value of a map with `f`, in the map's iteration order.
    pub fn on_each_value<K, V, I, F>(&mut self, entries: I, f: F) -> Step<()>
    where
        K: Display,
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&mut Context, V) -> Step<()>,
    {
        let located = entries.into_iter().map(|(key, value)| {
            (
                [
                    PathSegment::key(key.to_string()),
                    PathSegment::marker("map value"),
                ],
                value,
            )
        });
        self.each_element(MAP_EACH_VALUE_ID, located, f)
    }

    fn each_element<E, L, F>(&mut self, constraint_id: &str, located: L, mut f: F) -> Step<()>
    where
        L: Iterator<Item = ([PathSegment; 2], E)>,
        F: FnMut(&mut Context, E) -> Step<()>,
    {
        let mut failures: Vec<Vec<Message>> = Vec::new();
        for (segments, element) in located {
            let result = self.scoped(segments, |cx| cx.capture(|cx| f(cx, element)));
            if let Err(messages) = result {
                failures.push(messages);
                if self.is_fail_fast() {
                    break;
                }
            }
        }

        if failures.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = failures
            .iter()
            .map(|messages| {
                messages
                    .iter()
                    .map(|m| m.text.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .collect();
        let text = format!(
            "some elements do not satisfy the constraint: [{}]",
            texts.join(", ")
        );
        let message = Message::composite(constraint_id, text, failures)
            .with_root(self.root())
            .with_path(self.path().clone());
        self.record(message)
    }
}

/// Applies a rule to every element of a slice or vector.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::comparable, try_validate, Config, Each};
///
/// let all_positive = Each::new(comparable::greater_than(0i64));
/// let scores = vec![3i64, 0, 7];
///
/// let messages = try_validate(&Config::new(), |cx| cx.apply(&scores, &all_positive))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(messages.first().constraint_id, "kova.collection.onEach");
/// ```
#[derive(Debug, Clone)]
pub struct Each<R> {
    rule: R,
}

impl<R> Each<R> {
    /// Lifts `rule` to apply to every element.
    pub fn new(rule: R) -> Self {
        Self { rule }
    }
}

impl<T, R: Rule<T>> Rule<[T]> for Each<R> {
    fn apply(&self, input: &[T], cx: &mut Context) -> Step<()> {
        cx.on_each(input, |cx, element| self.rule.apply(element, cx))
    }
}

impl<T, R: Rule<T>> Rule<Vec<T>> for Each<R> {
    fn apply(&self, input: &Vec<T>, cx: &mut Context) -> Step<()> {
        <Self as Rule<[T]>>::apply(self, input.as_slice(), cx)
    }
}

/// Applies a rule to every key of a map.
#[derive(Debug, Clone)]
pub struct EachKey<R> {
    rule: R,
}

impl<R> EachKey<R> {
    /// Lifts `rule` to apply to every key.
    pub fn new(rule: R) -> Self {
        Self { rule }
    }
}

/// Applies a rule to every value of a map.
#[derive(Debug, Clone)]
pub struct EachValue<R> {
    rule: R,
}

impl<R> EachValue<R> {
    /// Lifts `rule` to apply to every value.
    pub fn new(rule: R) -> Self {
        Self { rule }
    }
}

impl<K, V, S, R> Rule<HashMap<K, V, S>> for EachKey<R>
where
    K: Display,
    S: BuildHasher,
    R: Rule<K>,
{
    fn apply(&self, input: &HashMap<K, V, S>, cx: &mut Context) -> Step<()> {
        cx.on_each_key(input, |cx, key| self.rule.apply(key, cx))
    }
}

impl<K, V, R> Rule<BTreeMap<K, V>> for EachKey<R>
where
    K: Display,
    R: Rule<K>,
{
    fn apply(&self, input: &BTreeMap<K, V>, cx: &mut Context) -> Step<()> {
        cx.on_each_key(input, |cx, key| self.rule.apply(key, cx))
    }
}

impl<K, V, S, R> Rule<IndexMap<K, V, S>> for EachKey<R>
where
    K: Display,
    R: Rule<K>,
{
    fn apply(&self, input: &IndexMap<K, V, S>, cx: &mut Context) -> Step<()> {
        cx.on_each_key(input, |cx, key| self.rule.apply(key, cx))
    }
}

impl<K, V, S, R> Rule<HashMap<K, V, S>> for EachValue<R>
where
    K: Display,
    S: BuildHasher,
    R: Rule<V>,
{
    fn apply(&self, input: &HashMap<K, V, S>, cx: &mut Context) -> Step<()> {
        cx.on_each_value(input, |cx, value| self.rule.apply(value, cx))
    }
}

impl<K, V, R> Rule<BTreeMap<K, V>> for EachValue<R>
where
    K: Display,
    R: Rule<V>,
{
    fn apply(&self, input: &BTreeMap<K, V>, cx: &mut Context) -> Step<()> {
        cx.on_each_value(input, |cx, value| self.rule.apply(value, cx))
    }
}

impl<K, V, S, R> Rule<IndexMap<K, V, S>> for EachValue<R>
where
    K: Display,
    R: Rule<V>,
{
    fn apply(&self, input: &IndexMap<K, V, S>, cx: &mut Context) -> Step<()> {
        cx.on_each_value(input, |cx, value| self.rule.apply(value, cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constraint::Check;
    use crate::session::try_validate;

    fn short() -> Check<str> {
        Check::new("test.short", |s: &str| s.len() <= 3).text(|s| format!("'{}' is too long", s))
    }

    #[test]
    fn test_empty_collection_is_satisfied() {
        let empty: Vec<&str> = Vec::new();
        let result = try_validate(&Config::new(), |cx| {
            cx.on_each(&empty, |_, _| panic!("no element expected"))
        });
        assert!(result.is_success());
    }

    #[test]
    fn test_summary_lists_failing_texts() {
        let items = ["ok", "long one", "also long"];
        let messages = try_validate(&Config::new(), |cx| {
            cx.on_each(items, |cx, item| cx.check(item, &short()).map(drop))
        })
        .into_result()
        .unwrap_err();

        assert_eq!(
            messages.first().text,
            "some elements do not satisfy the constraint: ['long one' is too long, 'also long' is too long]"
        );
    }

    #[test]
    fn test_iterable_marker() {
        let messages = try_validate(&Config::new(), |cx| {
            cx.on_each_iter(["toolong"].into_iter(), |cx, item| {
                cx.check(item, &short()).map(drop)
            })
        })
        .into_result()
        .unwrap_err();

        let composite = messages.first();
        assert_eq!(composite.constraint_id, ITERABLE_EACH_ID);
        let nested: Vec<_> = composite.nested().collect();
        assert_eq!(nested[0][0].path.full_name(), "[0]<iterable element>");
    }

    #[test]
    fn test_map_keys_and_values() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), "fine".to_string());
        map.insert("long".to_string(), "x".to_string());

        let key_rule = EachKey::new(crate::combinators::rule(|k: &String, cx: &mut Context| {
            cx.check(k.as_str(), &short()).map(drop)
        }));
        let value_rule = EachValue::new(crate::combinators::rule(|v: &String, cx: &mut Context| {
            cx.check(v.as_str(), &short()).map(drop)
        }));

        let messages = try_validate(&Config::new(), |cx| {
            cx.field("m", |cx| {
                cx.apply(&map, &key_rule)?;
                cx.apply(&map, &value_rule)
            })
        })
        .into_result()
        .unwrap_err();

        let ids: Vec<_> = messages.iter().map(|m| m.constraint_id.as_str()).collect();
        assert_eq!(ids, vec![MAP_EACH_KEY_ID, MAP_EACH_VALUE_ID]);

        let key_paths: Vec<_> = messages.first().nested().map(|m| m[0].path.full_name()).collect();
        assert_eq!(key_paths, vec!["m[long]<map key>"]);
        let value_paths: Vec<_> = messages
            .iter()
            .nth(1)
            .map(|m| m.nested().map(|n| n[0].path.full_name()).collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(value_paths, vec!["m[a]<map value>"]);
    }
}
