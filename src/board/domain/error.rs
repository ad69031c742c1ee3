//! Error types for board mutations, document validation and parsing.

use std::fmt;
use thiserror::Error;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// The kind of board entity an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A task record.
    Task,
    /// A board column.
    Column,
}

impl Entity {
    /// Returns a lowercase label for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Column => "column",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`BoardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardErrorKind {
    /// A referenced task or column does not exist.
    NotFound,
    /// Caller-supplied text, date or enum value is malformed.
    InvalidInput,
    /// A move target index lies outside the target column.
    IndexOutOfRange,
    /// An imported document is structurally malformed.
    SchemaViolation,
    /// An imported document (or a board state) breaks a board invariant.
    InvariantViolation,
}

/// Errors returned by board mutations and document validation.
///
/// Every variant carries enough context (identifier, field path, offending
/// value) to render a human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of the missing entity.
        entity: Entity,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// A field value was rejected.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Field name or document path of the rejected value.
        field: String,
        /// Description of the failure, including the offending value.
        reason: String,
    },

    /// A move target index is past the end of the target column.
    #[error("index {index} is out of range for a column holding {len} tasks")]
    IndexOutOfRange {
        /// Requested insertion index.
        index: usize,
        /// Length of the target column after the moved task was removed.
        len: usize,
    },

    /// A document does not have the expected shape.
    #[error("schema violation at {path}: {reason}")]
    SchemaViolation {
        /// Document path of the malformed value.
        path: String,
        /// Description of the expected shape.
        reason: String,
    },

    /// Columns and tasks are inconsistent with each other.
    #[error("invariant violation at {path}: {reason}")]
    InvariantViolation {
        /// Board or document path of the inconsistency.
        path: String,
        /// Description of the broken invariant.
        reason: String,
    },
}

impl BoardError {
    /// Creates a [`BoardError::NotFound`] for the given entity.
    #[must_use]
    pub fn not_found(entity: Entity, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a [`BoardError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`BoardError::SchemaViolation`].
    #[must_use]
    pub fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`BoardError::InvariantViolation`].
    #[must_use]
    pub fn invariant(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> BoardErrorKind {
        match self {
            Self::NotFound { .. } => BoardErrorKind::NotFound,
            Self::InvalidInput { .. } => BoardErrorKind::InvalidInput,
            Self::IndexOutOfRange { .. } => BoardErrorKind::IndexOutOfRange,
            Self::SchemaViolation { .. } => BoardErrorKind::SchemaViolation,
            Self::InvariantViolation { .. } => BoardErrorKind::InvariantViolation,
        }
    }
}

/// Error returned while parsing a priority label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority '{0}', expected High, Medium or Low")]
pub struct ParsePriorityError(pub String);

impl From<ParsePriorityError> for BoardError {
    fn from(err: ParsePriorityError) -> Self {
        Self::invalid_input("priority", err.to_string())
    }
}
