//! Violation messages.
//!
//! This module provides [`Message`] for a single constraint failure (possibly a
//! composite of other failures) and [`Messages`] for the ordered, non-empty
//! list a failed validation run produces.

mod messages;
mod violation;

pub use messages::Messages;
pub use violation::{Arg, Message};
