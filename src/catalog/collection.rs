//! Size constraints for collections and maps.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::{IndexMap, IndexSet};

use crate::constraint::Check;

/// Id of [`not_empty`].
pub const NOT_EMPTY: &str = "kova.collection.notEmpty";
/// Id of [`size`].
pub const SIZE: &str = "kova.collection.size";
/// Id of [`min_size`].
pub const MIN_SIZE: &str = "kova.collection.min";
/// Id of [`max_size`].
pub const MAX_SIZE: &str = "kova.collection.max";

/// Types with a number of elements.
pub trait Length {
    /// Returns the number of elements.
    fn length(&self) -> usize;
}

impl<T> Length for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Length for [T; N] {
    fn length(&self) -> usize {
        N
    }
}

impl<T> Length for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for VecDeque<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Length for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, S> Length for HashSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> Length for BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for BTreeSet<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Length for IndexMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, S> Length for IndexSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

/// The collection has at least one element.
pub fn not_empty<C: Length + ?Sized + 'static>() -> Check<C> {
    Check::new(NOT_EMPTY, |c: &C| c.length() > 0).message("must not be empty")
}

/// The collection has exactly `size` elements.
///
/// # Example
///
/// ```rust
/// use kova::{catalog::collection, try_validate, Config};
///
/// let pair = collection::size::<Vec<i64>>(2);
/// let result = try_validate(&Config::new(), |cx| cx.check(&vec![1i64, 2, 3], &pair));
/// assert_eq!(
///     result.into_result().unwrap_err().first().text,
///     "size must be 2, got 3"
/// );
/// ```
pub fn size<C: Length + ?Sized + 'static>(size: usize) -> Check<C> {
    Check::new(SIZE, move |c: &C| c.length() == size)
        .text(move |c| format!("size must be {}, got {}", size, c.length()))
        .arg(size)
}

/// The collection has at least `min` elements.
pub fn min_size<C: Length + ?Sized + 'static>(min: usize) -> Check<C> {
    Check::new(MIN_SIZE, move |c: &C| c.length() >= min)
        .text(move |c| format!("size must be at least {}, got {}", min, c.length()))
        .arg(min)
}

/// The collection has at most `max` elements.
pub fn max_size<C: Length + ?Sized + 'static>(max: usize) -> Check<C> {
    Check::new(MAX_SIZE, move |c: &C| c.length() <= max)
        .text(move |c| format!("size must be at most {}, got {}", max, c.length()))
        .arg(max)
}
