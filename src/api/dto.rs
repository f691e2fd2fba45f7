//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs keep `text` and `complete` as raw JSON values so that the
//! service decides how loosely typed input is interpreted. Unknown request
//! fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Todo;
use crate::service::TodoPatch;

// =============================================================================
// Requests
// =============================================================================

/// Request body for `POST /todos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    /// Text of the new todo.
    #[serde(default)]
    pub text: Option<Value>,
}

/// Request body for `PATCH /todos/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// Replacement text.
    #[serde(default)]
    pub text: Option<Value>,
    /// Requested completion state.
    #[serde(default)]
    pub complete: Option<Value>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            text: request.text,
            complete: request.complete,
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// JSON representation of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    /// Todo ID.
    pub id: String,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub complete: bool,
    /// Completion time in epoch milliseconds, `null` when incomplete.
    pub completed_at: Option<i64>,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            text: todo.text.clone(),
            complete: todo.complete,
            completed_at: todo.completed_at.map(|completed_at| completed_at.as_millis()),
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            text: todo.text,
            complete: todo.complete,
            completed_at: todo.completed_at.map(|completed_at| completed_at.as_millis()),
        }
    }
}

/// Envelope for `GET /todos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListResponse {
    /// All todos in storage order.
    pub todos: Vec<TodoResponse>,
}

/// Envelope for single-todo responses of `GET`, `PATCH` and `DELETE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoEnvelope {
    /// The todo.
    pub todo: TodoResponse,
}

impl From<Todo> for TodoEnvelope {
    fn from(todo: Todo) -> Self {
        Self {
            todo: TodoResponse::from(todo),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
