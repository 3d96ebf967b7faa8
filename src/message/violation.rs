//! The [`Message`] type and its arguments.

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;

use crate::path::Path;

/// An auxiliary value attached to a [`Message`].
///
/// Leaf messages carry scalar arguments such as thresholds. Composite messages
/// (`kova.or`, `kova.collection.onEach`, ...) carry one [`Arg::Messages`] entry
/// per failed branch or element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arg {
    /// A scalar value used when rendering the message text.
    Value(Value),
    /// The messages of one failed branch or element.
    Messages(Vec<Message>),
}

impl Arg {
    /// Returns the nested messages if this argument holds any.
    pub fn as_messages(&self) -> Option<&[Message]> {
        match self {
            Arg::Messages(messages) => Some(messages),
            Arg::Value(_) => None,
        }
    }

    /// Returns the scalar value if this argument holds one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Arg::Value(value) => Some(value),
            Arg::Messages(_) => None,
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<Vec<Message>> for Arg {
    fn from(messages: Vec<Message>) -> Self {
        Arg::Messages(messages)
    }
}

/// A single constraint violation with full context.
///
/// `Message` captures everything known about a failure:
/// - **constraint_id**: stable machine-readable identifier (e.g. `kova.comparable.min`)
/// - **text**: human-readable description
/// - **root**: identifier of the top-level value being validated
/// - **path**: where in the structure the failure occurred
/// - **input**: the offending value
/// - **args**: auxiliary values; nested message lists for composites
///
/// Messages are immutable once recorded. Re-attaching them below another scope
/// goes through [`Message::relocate`], which returns a copy.
///
/// # Example
///
/// ```rust
/// use kova::{Message, Path};
/// use serde_json::json;
///
/// let message = Message::new("kova.comparable.min", "must be greater than or equal to 0")
///     .with_path(Path::from_field("age"))
///     .with_input(json!(-5))
///     .with_arg(json!(0));
///
/// assert_eq!(message.constraint_id, "kova.comparable.min");
/// assert_eq!(message.to_string(), "age: must be greater than or equal to 0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Stable identifier of the violated constraint.
    pub constraint_id: String,
    /// Rendered human-readable description.
    pub text: String,
    /// Identifier of the top-level value being validated.
    pub root: String,
    /// Location of the offending value.
    pub path: Path,
    /// The offending value.
    pub input: Value,
    /// Auxiliary values, or nested message lists for composite messages.
    pub args: Vec<Arg>,
}

impl Message {
    /// Creates a message at the root path with no input and no arguments.
    pub fn new(constraint_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            constraint_id: constraint_id.into(),
            text: text.into(),
            root: String::new(),
            path: Path::root(),
            input: Value::Null,
            args: Vec::new(),
        }
    }

    /// Creates a composite message with one argument per group of nested messages.
    pub fn composite(
        constraint_id: impl Into<String>,
        text: impl Into<String>,
        groups: Vec<Vec<Message>>,
    ) -> Self {
        let mut message = Self::new(constraint_id, text);
        message.args = groups.into_iter().map(Arg::Messages).collect();
        message
    }

    /// Sets the root identifier and returns self for chaining.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the path and returns self for chaining.
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Sets the offending input and returns self for chaining.
    pub fn with_input(mut self, input: impl Into<Value>) -> Self {
        self.input = input.into();
        self
    }

    /// Appends a scalar argument and returns self for chaining.
    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(Arg::Value(arg.into()));
        self
    }

    /// Replaces the arguments and returns self for chaining.
    pub fn with_args(mut self, args: Vec<Arg>) -> Self {
        self.args = args;
        self
    }

    /// Returns a copy of this message with `prefix` prepended to its path and
    /// to the paths of all nested messages.
    pub fn relocate(&self, prefix: &Path) -> Self {
        let args = self
            .args
            .iter()
            .map(|arg| match arg {
                Arg::Value(value) => Arg::Value(value.clone()),
                Arg::Messages(messages) => {
                    Arg::Messages(messages.iter().map(|m| m.relocate(prefix)).collect())
                }
            })
            .collect();

        Self {
            constraint_id: self.constraint_id.clone(),
            text: self.text.clone(),
            root: self.root.clone(),
            path: prefix.concat(&self.path),
            input: self.input.clone(),
            args,
        }
    }

    /// Returns true if any argument is a nested message list.
    pub fn is_composite(&self) -> bool {
        self.args.iter().any(|arg| matches!(arg, Arg::Messages(_)))
    }

    /// Returns the nested message lists of a composite message, in order.
    pub fn nested(&self) -> impl Iterator<Item = &[Message]> {
        self.args.iter().filter_map(Arg::as_messages)
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.text)
        } else {
            write!(f, "{}: {}", self.path, self.text)
        }
    }
}

// Messages cross thread boundaries inside `ValidationError`.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Message>();
    assert_sync::<Message>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_creation() {
        let message = Message::new("kova.charSequence.notBlank", "must not be blank");

        assert_eq!(message.constraint_id, "kova.charSequence.notBlank");
        assert_eq!(message.text, "must not be blank");
        assert!(message.path.is_root());
        assert_eq!(message.input, Value::Null);
        assert!(message.args.is_empty());
        assert!(!message.is_composite());
    }

    #[test]
    fn test_message_builder() {
        let message = Message::new("kova.comparable.max", "must be less than or equal to 10")
            .with_root("Order")
            .with_path(Path::from_field("quantity"))
            .with_input(12)
            .with_arg(10);

        assert_eq!(message.root, "Order");
        assert_eq!(message.input, json!(12));
        assert_eq!(message.args, vec![Arg::Value(json!(10))]);
    }

    #[test]
    fn test_display_root() {
        let message = Message::new("dateRange.order", "end must not precede start");
        assert_eq!(message.to_string(), "(root): end must not precede start");
    }

    #[test]
    fn test_composite_nested_groups() {
        let a = Message::new("kova.charSequence.length", "a");
        let b = Message::new("kova.charSequence.length", "b");
        let c = Message::new("kova.charSequence.notBlank", "c");
        let composite = Message::composite("kova.or", "or", vec![vec![a.clone(), b.clone()], vec![c.clone()]]);

        assert!(composite.is_composite());
        let groups: Vec<_> = composite.nested().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], &[a, b][..]);
        assert_eq!(groups[1], &[c][..]);
    }

    #[test]
    fn test_relocate_rewrites_nested_paths() {
        let element = Message::new("kova.charSequence.length", "bad")
            .with_path(Path::from_field("tags").push_index(0).push_marker("collection element"));
        let composite = Message::composite("kova.collection.onEach", "some", vec![vec![element]])
            .with_path(Path::from_field("tags"));

        let prefix = Path::from_field("post");
        let moved = composite.relocate(&prefix);

        assert_eq!(moved.path.full_name(), "post.tags");
        let inner = &moved.nested().next().unwrap()[0];
        assert_eq!(inner.path.full_name(), "post.tags[0]<collection element>");
        // The original is untouched.
        assert_eq!(composite.path.full_name(), "tags");
    }

    #[test]
    fn test_serialization_shape() {
        let message = Message::new("kova.comparable.min", "too small")
            .with_path(Path::from_field("age"))
            .with_input(-1)
            .with_arg(0);

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["constraint_id"], "kova.comparable.min");
        assert_eq!(json["path"], "age");
        assert_eq!(json["args"], json!([0]));
    }
}
