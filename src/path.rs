//! Structural locators for values inside nested structures.
//!
//! This module provides [`Path`] and [`PathSegment`]. A path is built by
//! appending segments while validation descends into fields, indices, map keys
//! and synthetic element markers, and is rendered with [`Path::full_name`].

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

/// A segment of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field or property (e.g., `user`, `email`)
    Field(String),
    /// A sequence position (e.g., `[0]`, `[42]`)
    Index(usize),
    /// A map key, rendered like an index (e.g., `[en]`)
    Key(String),
    /// A synthetic marker such as `<collection element>`
    Marker(String),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Creates a new map key segment.
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }

    /// Creates a new marker segment. The name is given without angle brackets.
    pub fn marker(name: impl Into<String>) -> Self {
        PathSegment::Marker(name.into())
    }
}

/// An immutable path to a value in a nested structure.
///
/// `Path` represents locations like `users[0].email` or
/// `tags[1]<collection element>`. Every `push_*` method returns a new path and
/// leaves the receiver untouched, so a path captured by a message can never be
/// changed afterwards.
///
/// # Example
///
/// ```rust
/// use kova::Path;
///
/// let path = Path::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.full_name(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path with a map key segment appended.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        self.push(PathSegment::Key(key.into()))
    }

    /// Returns a new path with a marker segment appended.
    pub fn push_marker(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Marker(name.into()))
    }

    /// Returns a new path made of this path's segments followed by `other`'s.
    ///
    /// Used when messages produced under a relative path are re-attached
    /// below an outer scope.
    pub fn concat(&self, other: &Path) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + other.segments.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path with dots between fields and brackets around indices
    /// and keys, e.g. `fullName.first.value` or `list[1]<collection element>`.
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
                PathSegment::Key(key) => write!(f, "[{}]", key)?,
                PathSegment::Marker(name) => write!(f, "<{}>", name)?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
