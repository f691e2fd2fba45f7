//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, so helpers used by only one
//! file would otherwise warn in the others.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use todo_api::api::{AppState, router};
use todo_api::domain::{CompletedAt, FixedClock, Todo, TodoChanges, TodoDraft, TodoId};
use todo_api::infrastructure::{
    InMemoryTodoRepository, RepositoryError, RepositoryFuture, TodoRepository,
};
use todo_api::service::TodoService;

/// Clock value used by every test `AppState`.
pub const NOW: i64 = 1_700_000_000_000;

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Creates a test `AppState` over an empty in-memory repository and a fixed
/// clock.
pub fn create_test_app_state() -> AppState {
    create_app_state_with_repository(Arc::new(InMemoryTodoRepository::new()))
}

/// Creates a test `AppState` over the given repository and a fixed clock.
pub fn create_app_state_with_repository(repository: Arc<dyn TodoRepository>) -> AppState {
    AppState::new(TodoService::with_clock(
        repository,
        Arc::new(FixedClock::at_millis(NOW)),
    ))
}

/// Creates a test `AppState` whose storage fails every call.
pub fn create_failing_app_state() -> AppState {
    create_app_state_with_repository(Arc::new(FailingTodoRepository))
}

/// Seeds the two todos used across scenarios: an incomplete "First todo" and
/// a "Second todo" completed at 333.
pub async fn seed_todos(state: &AppState) -> (Todo, Todo) {
    let repository = state.todo_service.repository();
    let first = repository
        .insert(TodoDraft::new("First todo"))
        .await
        .expect("seed first todo");
    let second = repository
        .insert(TodoDraft::completed(
            "Second todo",
            CompletedAt::from_millis(333),
        ))
        .await
        .expect("seed second todo");
    (first, second)
}

// =============================================================================
// Failing Repository
// =============================================================================

/// Repository stub that fails every operation with a database error.
pub struct FailingTodoRepository;

pub const FAILURE_MESSAGE: &str = "connection refused";

fn failure<T: Send + 'static>() -> RepositoryFuture<T> {
    Box::pin(async { Err(RepositoryError::DatabaseError(FAILURE_MESSAGE.to_string())) })
}

impl TodoRepository for FailingTodoRepository {
    fn find_all(&self) -> RepositoryFuture<Vec<Todo>> {
        failure()
    }

    fn find_by_id(&self, _id: &TodoId) -> RepositoryFuture<Option<Todo>> {
        failure()
    }

    fn insert(&self, _draft: TodoDraft) -> RepositoryFuture<Todo> {
        failure()
    }

    fn update(&self, _id: &TodoId, _changes: TodoChanges) -> RepositoryFuture<Option<Todo>> {
        failure()
    }

    fn delete(&self, _id: &TodoId) -> RepositoryFuture<Option<Todo>> {
        failure()
    }
}

// =============================================================================
// HTTP Helpers
// =============================================================================

/// Builds the full router over `state`.
pub fn test_router(state: AppState) -> Router {
    router(state)
}

/// Sends one request through `app` and returns the status and parsed JSON
/// body (`Value::Null` when the body is empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    send_request(app, request).await
}

/// Sends a prepared request through `app`.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, json)
}
