//! Identifier types for board columns and tasks.

use super::{BoardError, BoardResult, Entity};
use serde::Serialize;
use std::fmt;

/// Identifier of a task, unique across the board's task map.
///
/// Identifiers are opaque: any non-blank string is accepted, so documents
/// exported by other tools keep their keys on import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] when the value is blank.
    pub fn new(value: impl Into<String>) -> BoardResult<Self> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(BoardError::invalid_input(
                "task id",
                "identifier must not be empty",
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a column, unique across the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a column identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] when the value is blank.
    pub fn new(value: impl Into<String>) -> BoardResult<Self> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(BoardError::invalid_input(
                "column id",
                "identifier must not be empty",
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh identifiers for new tasks and columns.
///
/// The board asks again when a generated value is already taken, so
/// implementations only need to make collisions unlikely.
pub trait IdGenerator: Send + Sync {
    /// Returns a candidate identifier for a new entity of the given kind.
    fn next_id(&self, entity: Entity) -> String;
}
