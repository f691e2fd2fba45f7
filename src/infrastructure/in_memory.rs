//! In-memory repository implementation.
//!
//! Suitable for development and tests. Records live in a `Vec` behind
//! `Arc<RwLock<...>>`, so list order is insertion order and each operation
//! runs under a single lock acquisition.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Todo, TodoChanges, TodoDraft, TodoId};
use crate::infrastructure::{RepositoryFuture, TodoRepository};

/// In-memory implementation of `TodoRepository`.
///
/// # Example
///
/// ```ignore
/// use todo_api::infrastructure::InMemoryTodoRepository;
///
/// let repository = InMemoryTodoRepository::new();
/// let todo = repository.insert(TodoDraft::new("Buy milk")).await?;
/// let found = repository.find_by_id(&todo.id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    /// Creates a new empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TodoRepository for InMemoryTodoRepository {
    fn find_all(&self) -> RepositoryFuture<Vec<Todo>> {
        let todos = Arc::clone(&self.todos);
        Box::pin(async move { Ok(todos.read().await.clone()) })
    }

    fn find_by_id(&self, id: &TodoId) -> RepositoryFuture<Option<Todo>> {
        let todos = Arc::clone(&self.todos);
        let id = *id;
        Box::pin(async move {
            let guard = todos.read().await;
            Ok(guard.iter().find(|todo| todo.id == id).cloned())
        })
    }

    fn insert(&self, draft: TodoDraft) -> RepositoryFuture<Todo> {
        let todos = Arc::clone(&self.todos);
        Box::pin(async move {
            let todo = Todo::from_draft(TodoId::generate(), draft);
            todos.write().await.push(todo.clone());
            Ok(todo)
        })
    }

    fn update(&self, id: &TodoId, changes: TodoChanges) -> RepositoryFuture<Option<Todo>> {
        let todos = Arc::clone(&self.todos);
        let id = *id;
        Box::pin(async move {
            let mut guard = todos.write().await;
            let Some(slot) = guard.iter_mut().find(|todo| todo.id == id) else {
                return Ok(None);
            };
            let updated = slot.clone().with_changes(changes);
            *slot = updated.clone();
            Ok(Some(updated))
        })
    }

    fn delete(&self, id: &TodoId) -> RepositoryFuture<Option<Todo>> {
        let todos = Arc::clone(&self.todos);
        let id = *id;
        Box::pin(async move {
            let mut guard = todos.write().await;
            let position = guard.iter().position(|todo| todo.id == id);
            Ok(position.map(|index| guard.remove(index)))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompletedAt;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn repository() -> InMemoryTodoRepository {
        InMemoryTodoRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_assigns_id_and_finds(repository: InMemoryTodoRepository) {
        let todo = repository.insert(TodoDraft::new("Buy milk")).await.unwrap();

        let found = repository.find_by_id(&todo.id).await.unwrap();
        assert_eq!(found, Some(todo));
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_by_id_missing(repository: InMemoryTodoRepository) {
        let found = repository.find_by_id(&TodoId::generate()).await.unwrap();
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_all_preserves_insertion_order(repository: InMemoryTodoRepository) {
        for text in ["one", "two", "three"] {
            repository.insert(TodoDraft::new(text)).await.unwrap();
        }

        let texts: Vec<String> = repository
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| todo.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_applies_changes(repository: InMemoryTodoRepository) {
        let todo = repository.insert(TodoDraft::new("Buy milk")).await.unwrap();
        let changes =
            TodoChanges::reconcile(None, Some(&json!(true)), CompletedAt::from_millis(1_000));

        let updated = repository.update(&todo.id, changes).await.unwrap().unwrap();

        assert_eq!(updated.text, "Buy milk");
        assert!(updated.complete);
        assert_eq!(updated.completed_at, Some(CompletedAt::from_millis(1_000)));
        assert_eq!(
            repository.find_by_id(&todo.id).await.unwrap(),
            Some(updated)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_missing_returns_none(repository: InMemoryTodoRepository) {
        let changes = TodoChanges::reconcile(None, None, CompletedAt::from_millis(0));
        let result = repository
            .update(&TodoId::generate(), changes)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_returns_previous_state(repository: InMemoryTodoRepository) {
        let todo = repository
            .insert(TodoDraft::completed("Done", CompletedAt::from_millis(333)))
            .await
            .unwrap();

        let deleted = repository.delete(&todo.id).await.unwrap();

        assert_eq!(deleted, Some(todo.clone()));
        assert!(repository.find_by_id(&todo.id).await.unwrap().is_none());
        assert!(repository.delete(&todo.id).await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_clones_share_storage(repository: InMemoryTodoRepository) {
        let other = repository.clone();
        repository.insert(TodoDraft::new("shared")).await.unwrap();

        assert_eq!(other.find_all().await.unwrap().len(), 1);
    }
}
