//! Service module: the todo resource manager.

pub mod error;
pub mod todo_service;

pub use error::{FieldError, TodoError, ValidationError};
pub use todo_service::{TodoPatch, TodoService};
