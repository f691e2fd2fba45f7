//! Domain module for todo management.
//!
//! This module contains the domain model and the completion rule.

pub mod clock;
pub mod todo;

pub use clock::{Clock, FixedClock, SystemClock};
pub use todo::{CompletedAt, Todo, TodoChanges, TodoDraft, TodoId};
