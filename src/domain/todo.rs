//! Todo domain model.
//!
//! This module contains the `Todo` entity, its identifier, and the
//! completion reconciliation rule applied on every update.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a todo.
///
/// Identifiers are assigned by the storage layer when a record is first
/// persisted and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generates a new time-ordered `TodoId` (UUID v7).
    ///
    /// **Note**: This is an impure function (side effect: time + random).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parses an identifier received from a caller.
    ///
    /// Returns `None` when the input is not a well-formed identifier. Callers
    /// treat that the same way as an identifier that matches no record.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::try_parse(value).ok().map(Self)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Completion time in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedAt(i64);

impl CompletedAt {
    /// Creates a `CompletedAt` from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the epoch milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

// =============================================================================
// Entity
// =============================================================================

/// A task record.
///
/// `completed_at` is `Some` exactly when `complete` is `true` for every record
/// written through [`TodoChanges::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Storage-assigned identifier.
    pub id: TodoId,
    /// The task description.
    pub text: String,
    /// Whether the task is done.
    pub complete: bool,
    /// When the task was marked done.
    pub completed_at: Option<CompletedAt>,
}

impl Todo {
    /// Materializes a draft under the identifier chosen by storage.
    #[must_use]
    pub fn from_draft(id: TodoId, draft: TodoDraft) -> Self {
        Self {
            id,
            text: draft.text,
            complete: draft.complete,
            completed_at: draft.completed_at,
        }
    }

    /// Returns a copy of this todo with `changes` applied.
    #[must_use]
    pub fn with_changes(self, changes: TodoChanges) -> Self {
        Self {
            id: self.id,
            text: changes.text.unwrap_or(self.text),
            complete: changes.complete,
            completed_at: changes.completed_at,
        }
    }
}

/// A todo that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    /// The task description.
    pub text: String,
    /// Initial completion flag.
    pub complete: bool,
    /// Initial completion time.
    pub completed_at: Option<CompletedAt>,
}

impl TodoDraft {
    /// Creates a draft with the creation defaults: incomplete, no timestamp.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            complete: false,
            completed_at: None,
        }
    }

    /// Creates a draft that is already complete.
    ///
    /// Used to seed storage with existing records.
    #[must_use]
    pub fn completed(text: impl Into<String>, completed_at: CompletedAt) -> Self {
        Self {
            text: text.into(),
            complete: true,
            completed_at: Some(completed_at),
        }
    }
}

// =============================================================================
// Reconciliation
// =============================================================================

/// The full set of fields written by a single update.
///
/// `complete` and `completed_at` are always written together; `text` is only
/// written when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    /// Replacement text, stored verbatim.
    pub text: Option<String>,
    /// New completion flag.
    pub complete: bool,
    /// New completion time.
    pub completed_at: Option<CompletedAt>,
}

impl TodoChanges {
    /// Applies the completion rule to a requested `complete` value.
    ///
    /// Only a JSON boolean `true` marks the todo complete, stamped with `now`.
    /// Anything else, including an absent value, a string `"true"` or `1`,
    /// clears both the flag and the timestamp.
    #[must_use]
    pub fn reconcile(text: Option<String>, complete: Option<&Value>, now: CompletedAt) -> Self {
        if matches!(complete, Some(Value::Bool(true))) {
            Self {
                text,
                complete: true,
                completed_at: Some(now),
            }
        } else {
            Self {
                text,
                complete: false,
                completed_at: None,
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
