//! Repository trait for todo storage.
//!
//! Methods return boxed futures so that a backend can be selected at runtime
//! and shared as `Arc<dyn TodoRepository>`. Every method maps to exactly one
//! atomic storage call.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Todo, TodoChanges, TodoDraft, TodoId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored record could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::SerializationError(error.to_string())
            }
            _ => Self::DatabaseError(error.to_string()),
        }
    }
}

/// Future returned by repository operations.
pub type RepositoryFuture<T> = BoxFuture<'static, Result<T, RepositoryError>>;

// =============================================================================
// Todo Repository
// =============================================================================

/// Storage for `Todo` records.
pub trait TodoRepository: Send + Sync {
    /// Returns every todo in storage order.
    fn find_all(&self) -> RepositoryFuture<Vec<Todo>>;

    /// Finds a todo by its ID.
    ///
    /// Returns `Ok(None)` if no record has this ID.
    fn find_by_id(&self, id: &TodoId) -> RepositoryFuture<Option<Todo>>;

    /// Persists a draft under a freshly assigned ID and returns the stored record.
    fn insert(&self, draft: TodoDraft) -> RepositoryFuture<Todo>;

    /// Applies `changes` to the record with this ID and returns the result.
    ///
    /// Returns `Ok(None)` if no record has this ID.
    fn update(&self, id: &TodoId, changes: TodoChanges) -> RepositoryFuture<Option<Todo>>;

    /// Removes the record with this ID and returns it as it was before removal.
    ///
    /// Returns `Ok(None)` if no record has this ID.
    fn delete(&self, id: &TodoId) -> RepositoryFuture<Option<Todo>>;
}

// =============================================================================
// Tests
// =============================================================================
