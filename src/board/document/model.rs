//! Exchange document records and the board-to-document serializer.

use crate::board::domain::{Board, Column, Priority, Task, TaskId};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Snapshot of a whole board in its exchange format.
///
/// ```json
/// {
///   "columns": [{ "id": "todo", "name": "To do", "task_ids": ["t1"] }],
///   "tasks": {
///     "t1": {
///       "title": "Write spec", "desc": "", "priority": "High",
///       "due": "", "tags": [], "done": false
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardDocument {
    /// Columns in display order.
    pub columns: Vec<ColumnRecord>,
    /// Tasks keyed by task identifier.
    pub tasks: BTreeMap<String, TaskRecord>,
}

/// Exchange form of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRecord {
    /// Column identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Task references in board order.
    pub task_ids: Vec<String>,
}

/// Exchange form of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub desc: String,
    /// Priority label.
    pub priority: Priority,
    /// `YYYY-MM-DD`, or empty when the task has no due date.
    pub due: String,
    /// Tag labels in sorted order.
    pub tags: Vec<String>,
    /// Completion flag.
    pub done: bool,
}

impl BoardDocument {
    /// Converts the document into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; the record types contain only strings,
    /// booleans and sequences, so this does not fail in practice.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Renders the document as indented JSON, keeping non-ASCII text as is.
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&Board> for BoardDocument {
    fn from(board: &Board) -> Self {
        Self {
            columns: board.columns().iter().map(ColumnRecord::from).collect(),
            tasks: board
                .tasks()
                .iter()
                .map(|(task_id, task)| (task_id.to_string(), TaskRecord::from(task)))
                .collect(),
        }
    }
}

impl From<&Column> for ColumnRecord {
    fn from(column: &Column) -> Self {
        Self {
            id: column.id().to_string(),
            name: column.name().to_owned(),
            task_ids: column.task_ids().iter().map(TaskId::to_string).collect(),
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().to_string(),
            desc: task.desc().to_owned(),
            priority: task.priority(),
            due: task.due().map(|due| due.to_string()).unwrap_or_default(),
            tags: task.tags().iter().map(str::to_owned).collect(),
            done: task.is_done(),
        }
    }
}
