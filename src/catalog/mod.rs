//! Built-in constraints.
//!
//! Every constructor returns a [`Check`](crate::Check) or
//! [`Convert`](crate::Convert) with a stable `kova.*` id, a default text
//! rendered from the offending input and the configured thresholds as args.
//! The text can be replaced with `.message(..)`.
//!
//! | Module | Inputs | Ids |
//! |---|---|---|
//! | [`chars`] | `str` | `kova.charSequence.*` |
//! | [`comparable`] | `T: PartialOrd` | `kova.comparable.*` |
//! | [`collection`] | [`Length`] implementors | `kova.collection.*` |
//! | [`parse`] | `str` | `kova.string.*` |
//! | [`nullable`] | `Option<T>` | `kova.nullable.*` |
//! | [`temporal`] | `DateTime<Utc>` | `kova.temporal.*` |

pub mod chars;
pub mod collection;
pub mod comparable;
pub mod nullable;
pub mod parse;
pub mod temporal;

pub use collection::Length;
