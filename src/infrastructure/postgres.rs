//! `PostgreSQL` repository implementation.
//!
//! Uses `sqlx` with a connection pool. Every operation is a single SQL
//! statement, so per-record atomicity comes from the database; updates and
//! deletes use `RETURNING` to read the affected row in the same statement.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE todos (
//!     id UUID PRIMARY KEY,
//!     text TEXT NOT NULL,
//!     complete BOOLEAN NOT NULL DEFAULT FALSE,
//!     completed_at BIGINT,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{CompletedAt, Todo, TodoChanges, TodoDraft, TodoId};
use crate::infrastructure::{RepositoryError, RepositoryFuture, TodoRepository};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos ( \
     id UUID PRIMARY KEY, \
     text TEXT NOT NULL, \
     complete BOOLEAN NOT NULL DEFAULT FALSE, \
     completed_at BIGINT, \
     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW() \
     )";

/// Raw column tuple for a `todos` row.
type TodoRow = (Uuid, String, bool, Option<i64>);

fn todo_from_row((id, text, complete, completed_at): TodoRow) -> Todo {
    Todo {
        id: TodoId::from_uuid(id),
        text,
        complete,
        completed_at: completed_at.map(CompletedAt::from_millis),
    }
}

/// `PostgreSQL` implementation of `TodoRepository`.
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/todo_app").await?;
/// let repository = PostgresTodoRepository::new(pool);
/// repository.ensure_schema().await?;
/// let todo = repository.insert(TodoDraft::new("Buy milk")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// Creates a repository backed by the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `todos` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("todos table ready");
        Ok(())
    }
}

impl TodoRepository for PostgresTodoRepository {
    fn find_all(&self) -> RepositoryFuture<Vec<Todo>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let rows: Vec<TodoRow> = sqlx::query_as(
                "SELECT id, text, complete, completed_at FROM todos ORDER BY created_at, id",
            )
            .fetch_all(&pool)
            .await?;

            Ok(rows.into_iter().map(todo_from_row).collect())
        })
    }

    fn find_by_id(&self, id: &TodoId) -> RepositoryFuture<Option<Todo>> {
        let pool = self.pool.clone();
        let id = *id.as_uuid();
        Box::pin(async move {
            let row: Option<TodoRow> =
                sqlx::query_as("SELECT id, text, complete, completed_at FROM todos WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&pool)
                    .await?;

            Ok(row.map(todo_from_row))
        })
    }

    fn insert(&self, draft: TodoDraft) -> RepositoryFuture<Todo> {
        let pool = self.pool.clone();
        let id = TodoId::generate();
        Box::pin(async move {
            let row: TodoRow = sqlx::query_as(
                "INSERT INTO todos (id, text, complete, completed_at) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, text, complete, completed_at",
            )
            .bind(id.as_uuid())
            .bind(&draft.text)
            .bind(draft.complete)
            .bind(draft.completed_at.map(CompletedAt::as_millis))
            .fetch_one(&pool)
            .await?;

            Ok(todo_from_row(row))
        })
    }

    fn update(&self, id: &TodoId, changes: TodoChanges) -> RepositoryFuture<Option<Todo>> {
        let pool = self.pool.clone();
        let id = *id.as_uuid();
        Box::pin(async move {
            let row: Option<TodoRow> = sqlx::query_as(
                "UPDATE todos \
                 SET text = COALESCE($2, text), complete = $3, completed_at = $4 \
                 WHERE id = $1 \
                 RETURNING id, text, complete, completed_at",
            )
            .bind(id)
            .bind(changes.text)
            .bind(changes.complete)
            .bind(changes.completed_at.map(CompletedAt::as_millis))
            .fetch_optional(&pool)
            .await?;

            Ok(row.map(todo_from_row))
        })
    }

    fn delete(&self, id: &TodoId) -> RepositoryFuture<Option<Todo>> {
        let pool = self.pool.clone();
        let id = *id.as_uuid();
        Box::pin(async move {
            let row: Option<TodoRow> = sqlx::query_as(
                "DELETE FROM todos WHERE id = $1 RETURNING id, text, complete, completed_at",
            )
            .bind(id)
            .fetch_optional(&pool)
            .await?;

            Ok(row.map(todo_from_row))
        })
    }
}
