//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use dto::{
    CreateTodoRequest, TodoEnvelope, TodoListResponse, TodoResponse, UpdateTodoRequest,
};
pub use error::{ApiError, ApiErrorResponse, FieldErrorBody};
pub use extract::JsonBody;
pub use handlers::{
    AppState, HealthResponse, create_todo, delete_todo, get_todo, health_check, list_todos,
    update_todo,
};
pub use routes::router;
