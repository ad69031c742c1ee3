//! Board configuration: seed layout and identifier prefixes.

use crate::board::domain::{Board, BoardError, BoardResult, Column, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A column created when a fresh board is seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSeed {
    /// Column identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl ColumnSeed {
    /// Creates a seed entry.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Configuration for new boards and generated identifiers.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration.
///
/// # Examples
///
/// ```
/// use kanban::board::config::BoardConfig;
///
/// let config = BoardConfig::from_json(r#"{ "task_id_prefix": "task" }"#)
///     .expect("valid configuration");
/// assert_eq!(config.task_id_prefix, "task");
/// assert_eq!(config.default_columns.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Columns of a freshly seeded board, left to right.
    pub default_columns: Vec<ColumnSeed>,
    /// Prefix for generated task identifiers.
    pub task_id_prefix: String,
    /// Prefix for generated column identifiers.
    pub column_id_prefix: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_columns: vec![
                ColumnSeed::new("todo", "To do"),
                ColumnSeed::new("inprog", "In progress"),
                ColumnSeed::new("done", "Done"),
            ],
            task_id_prefix: "t".to_owned(),
            column_id_prefix: "c".to_owned(),
        }
    }
}

impl BoardConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed text or wrongly typed
    /// fields.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Builds an empty board with the configured columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] for a blank seed id and
    /// [`BoardError::InvariantViolation`] for duplicate seed ids.
    pub fn seed_board(&self) -> BoardResult<Board> {
        let columns = self
            .default_columns
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                ColumnId::new(seed.id.as_str())
                    .map(|id| Column::new(id, seed.name.as_str()))
                    .map_err(|_| {
                        BoardError::invalid_input(
                            format!("default_columns[{index}].id"),
                            "column id must not be empty",
                        )
                    })
            })
            .collect::<BoardResult<Vec<_>>>()?;
        Board::from_parts(columns, BTreeMap::new())
    }
}
