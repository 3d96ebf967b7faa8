//! # Kova
//!
//! A composable validation engine that records every violation as a
//! path-aware message instead of stopping at the first one.
//!
//! ## Overview
//!
//! A validation run is a block of code executed against a [`Context`]. Each
//! atomic [`Constraint`] evaluated through the context yields a [`Verdict`];
//! violations are collected as [`Message`]s carrying the constraint id, a
//! rendered text, the offending input and the [`Path`] at which they
//! occurred. At the end of the run the messages become the failure side of
//! a stillwater `Validation`.
//!
//! Two policies are supported. In the default accumulate mode every
//! constraint is evaluated. In fail-fast mode the first violation stops the
//! rest of the run: context operations return [`Step`], and `?` propagates
//! the stop.
//!
//! ## Core Types
//!
//! - [`Path`]: location of a value inside the validated object, e.g.
//!   `fullName.first.value` or `list[1]<collection element>`
//! - [`Message`], [`Messages`]: a single violation and the non-empty list of
//!   a failed run
//! - [`Context`]: scoped descent (`field`, `index`, `nested`, `on_each`),
//!   disjunction (`or`) and correlation (`correlate`)
//! - [`Rule`]: reusable compositions ([`And`], [`Or`], [`Each`],
//!   [`ObjectRule`])
//! - [`Config`]: fail-fast flag, clock and evaluation logger
//!
//! ## Example
//!
//! ```rust
//! use kova::{catalog::{chars, parse}, try_validate, Config, Correlation};
//!
//! let result = try_validate(&Config::new(), |cx| {
//!     cx.field("name", |cx| cx.check("", &chars::not_blank()))?;
//!     let start = cx.field("start", |cx| cx.check("10", &parse::int()))?;
//!     let end = cx.field("end", |cx| cx.check("1", &parse::int()))?;
//!     if let (Some(start), Some(end)) = (start, end) {
//!         cx.correlate(Correlation::new("range.order", "start must not be after end"), start <= end)?;
//!     }
//!     Ok(())
//! });
//!
//! let messages = result.into_result().unwrap_err();
//! let ids: Vec<_> = messages.iter().map(|m| m.constraint_id.as_str()).collect();
//! assert_eq!(ids, vec!["kova.charSequence.notBlank", "range.order"]);
//! ```

pub mod catalog;
pub mod combinators;
pub mod config;
pub mod constraint;
pub mod context;
pub mod error;
pub mod factory;
pub mod log;
pub mod message;
pub mod path;
pub mod session;

pub use combinators::{
    rule, And, Correlation, Each, EachKey, EachValue, FnRule, ObjectRule, Or, OrChain, Rule,
    Validatable,
};
pub use config::{Clock, Config, FixedClock, SystemClock};
pub use constraint::{Check, Constraint, ConstraintContext, Convert, Verdict};
pub use context::Context;
pub use error::{ConfigError, ValidationError};
pub use factory::param_label;
pub use log::{LogEntry, LogRecorder, Logger};
pub use message::{Arg, Message, Messages};
pub use path::{Path, PathSegment};
pub use session::{try_validate, try_validate_value, validate, Halt, Outcome, Session, Step};

// Configurations and rules are shared between threads running independent
// sessions.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Config>();
    assert_send_sync::<ValidationError>();
    assert_send_sync::<LogRecorder>();
    assert_send_sync::<Check<str>>();
    assert_send_sync::<And<str>>();
    assert_send_sync::<Or<str>>();
};
