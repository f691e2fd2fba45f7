//! HTTP handlers for the Todo API.
//!
//! Handlers translate between HTTP and [`TodoService`]. Identifier path
//! segments are taken as plain strings so that malformed IDs reach the
//! service and come back as 404 rather than a path rejection.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{
    CreateTodoRequest, TodoEnvelope, TodoListResponse, TodoResponse, UpdateTodoRequest,
};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use crate::infrastructure::TodoRepository;
use crate::service::TodoService;

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The storage handle is created once at startup and reaches handlers only
/// through this state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The todo resource manager.
    pub todo_service: TodoService,
}

impl AppState {
    /// Creates a new `AppState` around a service.
    #[must_use]
    pub const fn new(todo_service: TodoService) -> Self {
        Self { todo_service }
    }

    /// Creates a new `AppState` from an initialized repository.
    #[must_use]
    pub fn from_repository(repository: Arc<dyn TodoRepository>) -> Self {
        Self::new(TodoService::new(repository))
    }
}

// =============================================================================
// Todo Handlers
// =============================================================================

/// `GET /todos`: lists all todos.
///
/// # Errors
///
/// Returns 400 if storage fails.
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<TodoListResponse>, ApiErrorResponse> {
    let todos = state.todo_service.list().await?;
    Ok(Json(TodoListResponse {
        todos: todos.into_iter().map(TodoResponse::from).collect(),
    }))
}

/// `GET /todos/{id}`: fetches one todo.
///
/// # Errors
///
/// Returns 404 for a malformed or unknown ID and 400 if storage fails.
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoEnvelope>, ApiErrorResponse> {
    let todo = state.todo_service.get(&id).await?;
    Ok(Json(TodoEnvelope::from(todo)))
}

/// `POST /todos`: creates a todo.
///
/// Responds with the bare created todo, not wrapped in an envelope.
///
/// # Errors
///
/// Returns 400 if the text is missing or blank, the body is not JSON, or
/// storage fails.
pub async fn create_todo(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateTodoRequest>,
) -> Result<Json<TodoResponse>, ApiErrorResponse> {
    let todo = state.todo_service.create(request.text.as_ref()).await?;
    Ok(Json(TodoResponse::from(todo)))
}

/// `PATCH /todos/{id}`: updates text and completion state.
///
/// A request without a JSON body is treated as an empty patch.
///
/// # Errors
///
/// Returns 404 for a malformed or unknown ID and 400 for an invalid body or
/// storage failure.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<JsonBody<UpdateTodoRequest>>,
) -> Result<Json<TodoEnvelope>, ApiErrorResponse> {
    let request = body.map(|JsonBody(request)| request).unwrap_or_default();
    let todo = state.todo_service.update(&id, request.into()).await?;
    Ok(Json(TodoEnvelope::from(todo)))
}

/// `DELETE /todos/{id}`: deletes a todo and returns its last state.
///
/// # Errors
///
/// Returns 404 for a malformed or unknown ID and 400 if storage fails.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoEnvelope>, ApiErrorResponse> {
    let todo = state.todo_service.delete(&id).await?;
    Ok(Json(TodoEnvelope::from(todo)))
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
