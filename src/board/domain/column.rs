//! Board columns and the column-deletion disposition.

use super::{ColumnId, TaskId};

/// A named, ordered lane of task references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    id: ColumnId,
    name: String,
    task_ids: Vec<TaskId>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub fn new(id: ColumnId, name: impl Into<String>) -> Self {
        Self::with_task_ids(id, name, Vec::new())
    }

    /// Creates a column holding the given task references in order.
    #[must_use]
    pub fn with_task_ids(id: ColumnId, name: impl Into<String>, task_ids: Vec<TaskId>) -> Self {
        Self {
            id,
            name: name.into(),
            task_ids,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task references in board order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns the number of referenced tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Returns `true` when the column references no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Returns `true` when the column references `task_id`.
    #[must_use]
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    /// Returns the position of `task_id` within the column.
    #[must_use]
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn push(&mut self, task_id: TaskId) {
        self.task_ids.push(task_id);
    }

    pub(crate) fn insert(&mut self, index: usize, task_id: TaskId) {
        self.task_ids.insert(index, task_id);
    }

    pub(crate) fn remove(&mut self, task_id: &TaskId) -> Option<usize> {
        let position = self.position(task_id)?;
        self.task_ids.remove(position);
        Some(position)
    }

    pub(crate) fn take_task_ids(&mut self) -> Vec<TaskId> {
        std::mem::take(&mut self.task_ids)
    }
}

/// Handling of the tasks still referenced by a column being deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDisposition {
    /// Delete every task the column references.
    CascadeDeleteTasks,
    /// Append the column's tasks, in order, to the end of another column.
    MoveTasksTo(ColumnId),
}
