//! Todo use-case service.
//!
//! Every operation validates its input locally and then performs exactly one
//! storage call. Identifiers are resolved in a single step: a string that is
//! not a well-formed `TodoId` fails the same way as an ID with no record.

use std::sync::Arc;

use serde_json::Value;

use super::error::{TodoError, ValidationError};
use crate::domain::{Clock, SystemClock, Todo, TodoChanges, TodoDraft, TodoId};
use crate::infrastructure::{RepositoryError, TodoRepository};

/// Requested changes for an update.
///
/// Fields hold raw JSON values: `complete` is interpreted by
/// [`TodoChanges::reconcile`] and only a boolean `true` counts as complete.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    /// Replacement text.
    pub text: Option<Value>,
    /// Requested completion state.
    pub complete: Option<Value>,
}

/// Create, read, update and delete operations for todos.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TodoService")
            .field("repository", &"Arc<dyn TodoRepository>")
            .field("clock", &"Arc<dyn Clock>")
            .finish()
    }
}

impl TodoService {
    /// Creates a service over `repository` using the system clock.
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    /// Creates a service with an explicit time source.
    #[must_use]
    pub fn with_clock(repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Returns the underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &Arc<dyn TodoRepository> {
        &self.repository
    }

    /// Lists every todo in storage order.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Storage` if the repository fails.
    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let todos = self
            .repository
            .find_all()
            .await
            .map_err(|error| storage_failure("list", error))?;
        tracing::debug!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    /// Fetches one todo.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::NotFound` for a malformed or unknown ID and
    /// `TodoError::Storage` if the repository fails.
    pub async fn get(&self, id: &str) -> Result<Todo, TodoError> {
        let todo_id = resolve_id(id)?;
        self.repository
            .find_by_id(&todo_id)
            .await
            .map_err(|error| storage_failure("get", error))?
            .ok_or_else(|| not_found(id))
    }

    /// Creates a todo from the raw `text` field of a request.
    ///
    /// The stored text is trimmed. The new todo is incomplete.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Validation` if the text is missing or blank and
    /// `TodoError::Storage` if the repository fails.
    pub async fn create(&self, text: Option<&Value>) -> Result<Todo, TodoError> {
        let text = validate_new_text(text)?;
        let todo = self
            .repository
            .insert(TodoDraft::new(text))
            .await
            .map_err(|error| storage_failure("create", error))?;
        tracing::info!(todo_id = %todo.id, "Created todo");
        Ok(todo)
    }

    /// Updates a todo, enforcing the completion rule.
    ///
    /// Text is replaced verbatim and is not checked for emptiness.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::NotFound` for a malformed or unknown ID,
    /// `TodoError::Validation` if `text` is not a scalar, and
    /// `TodoError::Storage` if the repository fails.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo, TodoError> {
        let todo_id = resolve_id(id)?;
        let text = patch.text.as_ref().map(text_from_value).transpose()?;
        let changes = TodoChanges::reconcile(text, patch.complete.as_ref(), self.clock.now());

        let todo = self
            .repository
            .update(&todo_id, changes)
            .await
            .map_err(|error| storage_failure("update", error))?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(todo_id = %todo.id, complete = todo.complete, "Updated todo");
        Ok(todo)
    }

    /// Deletes a todo and returns it as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::NotFound` for a malformed or unknown ID and
    /// `TodoError::Storage` if the repository fails.
    pub async fn delete(&self, id: &str) -> Result<Todo, TodoError> {
        let todo_id = resolve_id(id)?;
        let todo = self
            .repository
            .delete(&todo_id)
            .await
            .map_err(|error| storage_failure("delete", error))?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(todo_id = %todo.id, "Deleted todo");
        Ok(todo)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn resolve_id(id: &str) -> Result<TodoId, TodoError> {
    TodoId::parse(id).ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> TodoError {
    tracing::debug!(todo_id = id, "Todo not found");
    TodoError::NotFound(id.to_string())
}

fn storage_failure(operation: &'static str, error: RepositoryError) -> TodoError {
    tracing::error!(%error, operation, "Storage operation failed");
    TodoError::Storage(error)
}

/// Reads a text field, accepting strings and the scalars a document store
/// would cast to strings.
fn text_from_value(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(ValidationError::single("text", "Text must be a string"))
        }
    }
}

fn validate_new_text(value: Option<&Value>) -> Result<String, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::single("text", "Text is required"))?;
    let text = text_from_value(value)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::single("text", "Text must not be empty"));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletedAt, FixedClock};
    use crate::infrastructure::{InMemoryTodoRepository, RepositoryFuture};
    use proptest::prelude::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn fresh_service() -> TodoService {
        TodoService::with_clock(
            Arc::new(InMemoryTodoRepository::new()),
            Arc::new(FixedClock::at_millis(NOW)),
        )
    }

    #[fixture]
    fn service() -> TodoService {
        fresh_service()
    }

    struct BrokenRepository;

    impl TodoRepository for BrokenRepository {
        fn find_all(&self) -> RepositoryFuture<Vec<Todo>> {
            Box::pin(async { Err(RepositoryError::DatabaseError("offline".to_string())) })
        }

        fn find_by_id(&self, _id: &TodoId) -> RepositoryFuture<Option<Todo>> {
            Box::pin(async { Err(RepositoryError::DatabaseError("offline".to_string())) })
        }

        fn insert(&self, _draft: TodoDraft) -> RepositoryFuture<Todo> {
            Box::pin(async { Err(RepositoryError::DatabaseError("offline".to_string())) })
        }

        fn update(&self, _id: &TodoId, _changes: TodoChanges) -> RepositoryFuture<Option<Todo>> {
            Box::pin(async { Err(RepositoryError::DatabaseError("offline".to_string())) })
        }

        fn delete(&self, _id: &TodoId) -> RepositoryFuture<Option<Todo>> {
            Box::pin(async { Err(RepositoryError::DatabaseError("offline".to_string())) })
        }
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    #[rstest]
    #[case(json!("  Walk the dog  "), "Walk the dog")]
    #[case(json!(42), "42")]
    #[case(json!(false), "false")]
    fn test_validate_new_text_accepts(#[case] input: Value, #[case] expected: &str) {
        assert_eq!(validate_new_text(Some(&input)).unwrap(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(json!("")))]
    #[case(Some(json!("   \t\n")))]
    #[case(Some(Value::Null))]
    #[case(Some(json!(["a"])))]
    #[case(Some(json!({"text": "nested"})))]
    fn test_validate_new_text_rejects(#[case] input: Option<Value>) {
        let error = validate_new_text(input.as_ref()).unwrap_err();
        assert_eq!(error.errors[0].field, "text");
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    #[rstest]
    #[tokio::test]
    async fn test_create_defaults_incomplete(service: TodoService) {
        let todo = service.create(Some(&json!("Test todo"))).await.unwrap();

        assert_eq!(todo.text, "Test todo");
        assert!(!todo.complete);
        assert!(todo.completed_at.is_none());
        assert_eq!(service.list().await.unwrap(), vec![todo]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_blank_persists_nothing(service: TodoService) {
        let result = service.create(Some(&json!("   "))).await;

        assert!(matches!(result, Err(TodoError::Validation(_))));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_round_trip(service: TodoService) {
        let todo = service.create(Some(&json!("First todo"))).await.unwrap();

        let found = service.get(&todo.id.to_string()).await.unwrap();
        assert_eq!(found, todo);
    }

    #[rstest]
    #[case("123")]
    #[case("0190a2b4-5c6d-7e8f-9a0b-1c2d3e4f5a6b")]
    #[tokio::test]
    async fn test_get_update_delete_unknown_are_not_found(
        service: TodoService,
        #[case] id: &str,
    ) {
        assert_eq!(
            service.get(id).await,
            Err(TodoError::NotFound(id.to_string()))
        );
        assert_eq!(
            service.update(id, TodoPatch::default()).await,
            Err(TodoError::NotFound(id.to_string()))
        );
        assert_eq!(
            service.delete(id).await,
            Err(TodoError::NotFound(id.to_string()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_malformed_id_never_touches_storage() {
        let service = TodoService::new(Arc::new(BrokenRepository));

        assert!(matches!(service.get("123").await, Err(TodoError::NotFound(_))));
        assert!(matches!(
            service.update("123", TodoPatch::default()).await,
            Err(TodoError::NotFound(_))
        ));
        assert!(matches!(service.delete("123").await, Err(TodoError::NotFound(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_storage_failures_surface_as_storage_errors() {
        let service = TodoService::new(Arc::new(BrokenRepository));
        let id = TodoId::generate().to_string();

        assert!(matches!(service.list().await, Err(TodoError::Storage(_))));
        assert!(matches!(service.get(&id).await, Err(TodoError::Storage(_))));
        assert!(matches!(
            service.create(Some(&json!("text"))).await,
            Err(TodoError::Storage(_))
        ));
        assert!(matches!(
            service.update(&id, TodoPatch::default()).await,
            Err(TodoError::Storage(_))
        ));
        assert!(matches!(service.delete(&id).await, Err(TodoError::Storage(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_complete_true_stamps_clock(service: TodoService) {
        let todo = service.create(Some(&json!("First todo"))).await.unwrap();
        let patch = TodoPatch {
            text: Some(json!("Updated first todo")),
            complete: Some(json!(true)),
        };

        let updated = service.update(&todo.id.to_string(), patch).await.unwrap();

        assert_eq!(updated.text, "Updated first todo");
        assert!(updated.complete);
        assert_eq!(updated.completed_at, Some(CompletedAt::from_millis(NOW)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_clears_existing_timestamp(service: TodoService) {
        let seeded = service
            .repository()
            .insert(TodoDraft::completed("Second todo", CompletedAt::from_millis(333)))
            .await
            .unwrap();
        let patch = TodoPatch {
            text: Some(json!("Updated second todo")),
            complete: Some(json!(false)),
        };

        let updated = service.update(&seeded.id.to_string(), patch).await.unwrap();

        assert_eq!(updated.text, "Updated second todo");
        assert!(!updated.complete);
        assert!(updated.completed_at.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_accepts_empty_text_verbatim(service: TodoService) {
        let todo = service.create(Some(&json!("First todo"))).await.unwrap();
        let patch = TodoPatch {
            text: Some(json!("  ")),
            complete: None,
        };

        let updated = service.update(&todo.id.to_string(), patch).await.unwrap();
        assert_eq!(updated.text, "  ");
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_rejects_structured_text(service: TodoService) {
        let todo = service.create(Some(&json!("First todo"))).await.unwrap();
        let patch = TodoPatch {
            text: Some(json!({"value": "x"})),
            complete: Some(json!(true)),
        };

        let result = service.update(&todo.id.to_string(), patch).await;

        assert!(matches!(result, Err(TodoError::Validation(_))));
        assert_eq!(service.get(&todo.id.to_string()).await.unwrap(), todo);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_then_get_is_not_found(service: TodoService) {
        let todo = service.create(Some(&json!("Doomed"))).await.unwrap();
        let id = todo.id.to_string();

        assert_eq!(service.delete(&id).await.unwrap(), todo);
        assert_eq!(service.get(&id).await, Err(TodoError::NotFound(id.clone())));
    }

    proptest! {
        #[test]
        fn prop_blank_text_never_creates(blank in "[ \t\r\n]{0,16}") {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let service = fresh_service();
            let result = runtime.block_on(service.create(Some(&Value::String(blank))));

            prop_assert!(matches!(result, Err(TodoError::Validation(_))));
            prop_assert!(runtime.block_on(service.list()).unwrap().is_empty());
        }

        #[test]
        fn prop_non_blank_text_creates_incomplete(text in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,31}") {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let todo = runtime.block_on(fresh_service().create(Some(&Value::String(text.clone())))).unwrap();

            prop_assert_eq!(todo.text, text.trim());
            prop_assert!(!todo.complete);
            prop_assert!(todo.completed_at.is_none());
        }
    }
}
