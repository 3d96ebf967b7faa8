//! The non-empty message list produced by a failed validation run.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use super::violation::Message;
use crate::path::Path;

/// A non-empty, ordered collection of violation messages.
///
/// `Messages` wraps a `NonEmptyVec<Message>`, so a failure always carries at
/// least one message. Order is the order in which violations were recorded:
/// left to right, depth first.
///
/// # Combining
///
/// `Messages` implements `Semigroup`; combining concatenates in order.
///
/// ```rust
/// use kova::{Message, Messages};
/// use stillwater::prelude::*;
///
/// let first = Messages::single(Message::new("kova.charSequence.notBlank", "must not be blank"));
/// let second = Messages::single(Message::new("kova.comparable.min", "too small"));
///
/// let combined = first.combine(second);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().constraint_id, "kova.charSequence.notBlank");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Messages(NonEmptyVec<Message>);

impl Messages {
    /// Creates a `Messages` containing a single message.
    pub fn single(message: Message) -> Self {
        Self(NonEmptyVec::singleton(message))
    }

    /// Creates a `Messages` from a `Vec`, or `None` if the vec is empty.
    pub fn from_vec(messages: Vec<Message>) -> Option<Self> {
        NonEmptyVec::from_vec(messages).map(Self)
    }

    /// Returns the number of top-level messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the top-level messages.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.0.iter()
    }

    /// Returns the first recorded message.
    pub fn first(&self) -> &Message {
        self.0.head()
    }

    /// Returns all top-level messages recorded at `path`.
    pub fn at_path(&self, path: &Path) -> Vec<&Message> {
        self.0.iter().filter(|m| &m.path == path).collect()
    }

    /// Returns all top-level messages with the given constraint id.
    pub fn with_id(&self, constraint_id: &str) -> Vec<&Message> {
        self.0
            .iter()
            .filter(|m| m.constraint_id == constraint_id)
            .collect()
    }

    /// Returns every non-composite message, descending into composites depth first.
    pub fn leaves(&self) -> Vec<&Message> {
        fn walk<'a>(message: &'a Message, out: &mut Vec<&'a Message>) {
            if message.is_composite() {
                for group in message.nested() {
                    for nested in group {
                        walk(nested, out);
                    }
                }
            } else {
                out.push(message);
            }
        }

        let mut out = Vec::new();
        for message in self.0.iter() {
            walk(message, &mut out);
        }
        out
    }

    /// Serializes the whole message tree to JSON.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|m| serde_json::to_value(m).unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// Converts this collection into a `Vec<Message>`.
    pub fn into_vec(self) -> Vec<Message> {
        self.0.into_vec()
    }
}

impl Semigroup for Messages {
    fn combine(self, other: Self) -> Self {
        Messages(self.0.combine(other.0))
    }
}

impl Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} message(s):", self.len())?;
        for (i, message) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Messages {}

impl IntoIterator for Messages {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a Message;
    type IntoIter = Box<dyn Iterator<Item = &'a Message> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Messages>();
    assert_sync::<Messages>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, field: &str) -> Message {
        Message::new(id, format!("{} failed", field)).with_path(Path::from_field(field))
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(Messages::from_vec(Vec::new()).is_none());
        let messages = Messages::from_vec(vec![message("a", "x")]).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(!messages.is_empty());

        let ordered = Messages::from_vec(vec![message("a", "x"), message("b", "y")]).unwrap();
        let ids: Vec<_> = ordered.iter().map(|m| m.constraint_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_combine_preserves_order() {
        let combined = Messages::single(message("a", "x"))
            .combine(Messages::single(message("b", "y")))
            .combine(Messages::single(message("c", "z")));

        let ids: Vec<_> = combined.iter().map(|m| m.constraint_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_at_path_and_with_id() {
        let messages = Messages::from_vec(vec![
            message("required", "name"),
            message("invalid", "name"),
            message("required", "email"),
        ])
        .unwrap();

        assert_eq!(messages.at_path(&Path::from_field("name")).len(), 2);
        assert_eq!(messages.with_id("required").len(), 2);
        assert_eq!(messages.with_id("invalid").len(), 1);
    }

    #[test]
    fn test_leaves_descend_into_composites() {
        let composite = Message::composite(
            "kova.or",
            "or",
            vec![vec![message("a", "x")], vec![message("b", "y"), message("c", "z")]],
        );
        let messages = Messages::from_vec(vec![composite, message("d", "w")]).unwrap();

        let ids: Vec<_> = messages.leaves().iter().map(|m| m.constraint_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_display() {
        let messages =
            Messages::from_vec(vec![message("a", "name"), message("b", "email")]).unwrap();
        let display = messages.to_string();

        assert!(display.contains("2 message(s)"));
        assert!(display.contains("name: name failed"));
        assert!(display.contains("email: email failed"));
    }

    #[test]
    fn test_to_json() {
        let messages = Messages::single(message("a", "name"));
        let json = messages.to_json();
        assert_eq!(json[0]["constraint_id"], "a");
        assert_eq!(json[0]["path"], "name");
    }
}
