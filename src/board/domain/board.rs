//! Board aggregate root: columns, tasks and their referential invariants.
//!
//! Every mutation runs against a working copy of the board. The copy is
//! checked against the board invariants and only then replaces the live
//! value, so a failed call never leaves a partial change behind.

use super::{
    BoardError, BoardResult, Column, ColumnDisposition, ColumnId, Entity, IdGenerator, NewTask,
    Task, TaskId, TaskPatch,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Attempts made to draw an unused identifier from an [`IdGenerator`], on
/// top of one attempt per identifier already in use.
const MAX_ID_ATTEMPTS: usize = 32;

/// Aggregate of all columns and tasks for one board.
///
/// Invariants:
/// 1. every id in a column's `task_ids` is a key of `tasks`;
/// 2. every task is referenced by exactly one column;
/// 3. no id appears twice within one column;
/// 4. column ids are unique.
///
/// Due dates are valid by construction of [`super::DueDate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    columns: Vec<Column>,
    tasks: BTreeMap<TaskId, Task>,
}

impl Board {
    /// Creates a board with no columns and no tasks.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assembles a board from parts, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvariantViolation`] describing the first
    /// inconsistency found.
    pub fn from_parts(columns: Vec<Column>, tasks: BTreeMap<TaskId, Task>) -> BoardResult<Self> {
        let board = Self { columns, tasks };
        board.check_invariants()?;
        Ok(board)
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the task map.
    #[must_use]
    pub const fn tasks(&self) -> &BTreeMap<TaskId, Task> {
        &self.tasks
    }

    /// Looks up a column.
    #[must_use]
    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == column_id)
    }

    /// Looks up a task.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Returns the column that holds `task_id`.
    #[must_use]
    pub fn column_of(&self, task_id: &TaskId) -> Option<&Column> {
        self.columns.iter().find(|column| column.contains(task_id))
    }

    /// Returns every distinct tag used on the board, sorted.
    #[must_use]
    pub fn all_tags(&self) -> Vec<&str> {
        self.tasks
            .values()
            .flat_map(|task| task.tags().iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Checks the referential invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvariantViolation`] with the path of the first
    /// offending column entry or task.
    pub fn check_invariants(&self) -> BoardResult<()> {
        let mut column_ids = HashSet::with_capacity(self.columns.len());
        let mut owners: HashMap<&TaskId, &ColumnId> = HashMap::with_capacity(self.tasks.len());

        for (column_index, column) in self.columns.iter().enumerate() {
            if !column_ids.insert(column.id()) {
                return Err(BoardError::invariant(
                    format!("columns[{column_index}].id"),
                    format!("duplicate column id '{}'", column.id()),
                ));
            }

            for (slot, task_id) in column.task_ids().iter().enumerate() {
                let path = format!("columns[{column_index}].task_ids[{slot}]");
                if !self.tasks.contains_key(task_id) {
                    return Err(BoardError::invariant(
                        path,
                        format!(
                            "task id '{task_id}' referenced by column '{}' not found in tasks",
                            column.id()
                        ),
                    ));
                }
                if let Some(owner) = owners.insert(task_id, column.id()) {
                    let reason = if owner == column.id() {
                        format!("task id '{task_id}' appears twice in column '{owner}'")
                    } else {
                        format!("task id '{task_id}' is already placed in column '{owner}'")
                    };
                    return Err(BoardError::invariant(path, reason));
                }
            }
        }

        if let Some(orphan) = self.tasks.keys().find(|id| !owners.contains_key(id)) {
            return Err(BoardError::invariant(
                format!("tasks.{orphan}"),
                format!("task id '{orphan}' is not placed in any column"),
            ));
        }

        Ok(())
    }

    /// Adds a task at the end of a column and returns its fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown column and
    /// [`BoardError::InvalidInput`] for a blank title or malformed due date.
    pub fn add_task(
        &mut self,
        column_id: &ColumnId,
        request: NewTask,
        ids: &impl IdGenerator,
    ) -> BoardResult<TaskId> {
        self.commit(|board| {
            board.require_column(column_id)?;
            let task = Task::from_new(request)?;
            let task_id = board.fresh_task_id(ids)?;
            board.column_mut(column_id)?.push(task_id.clone());
            board.tasks.insert(task_id.clone(), task);
            Ok(task_id)
        })
    }

    /// Applies a patch to an existing task.
    ///
    /// The task keeps its identifier and column placement.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown task and
    /// [`BoardError::InvalidInput`] when a patched field is invalid.
    pub fn edit_task(&mut self, task_id: &TaskId, patch: &TaskPatch) -> BoardResult<()> {
        self.commit(|board| {
            let task = board
                .tasks
                .get_mut(task_id)
                .ok_or_else(|| BoardError::not_found(Entity::Task, task_id))?;
            *task = task.patched(patch)?;
            Ok(())
        })
    }

    /// Removes a task from its column and from the task map.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown task.
    pub fn delete_task(&mut self, task_id: &TaskId) -> BoardResult<Task> {
        self.commit(|board| {
            let task = board
                .tasks
                .remove(task_id)
                .ok_or_else(|| BoardError::not_found(Entity::Task, task_id))?;
            for column in &mut board.columns {
                column.remove(task_id);
            }
            Ok(task)
        })
    }

    /// Moves a task to `target_index` within `target_column_id`.
    ///
    /// The index is interpreted after the task has been taken out of its
    /// current column, so moving a task to its own position is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown task or column and
    /// [`BoardError::IndexOutOfRange`] when `target_index` exceeds the length
    /// of the target column.
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
    ) -> BoardResult<()> {
        self.relocate(task_id, target_column_id, |len| {
            if target_index > len {
                return Err(BoardError::IndexOutOfRange {
                    index: target_index,
                    len,
                });
            }
            Ok(target_index)
        })
    }

    /// Moves a task like [`Self::move_task`], clamping an index past the end
    /// of the target column to an append.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown task or column.
    pub fn move_task_clamped(
        &mut self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
    ) -> BoardResult<()> {
        self.relocate(task_id, target_column_id, |len| Ok(target_index.min(len)))
    }

    /// Appends an empty column and returns its fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] when `name` is blank.
    pub fn add_column(&mut self, name: &str, ids: &impl IdGenerator) -> BoardResult<ColumnId> {
        self.commit(|board| {
            let trimmed = column_name(name)?;
            let column_id = board.fresh_column_id(ids)?;
            board.columns.push(Column::new(column_id.clone(), trimmed));
            Ok(column_id)
        })
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for an unknown column and
    /// [`BoardError::InvalidInput`] when `name` is blank.
    pub fn rename_column(&mut self, column_id: &ColumnId, name: &str) -> BoardResult<()> {
        self.commit(|board| {
            let column = board.column_mut(column_id)?;
            column.rename(column_name(name)?);
            Ok(())
        })
    }

    /// Deletes a column, first applying `disposition` to its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the column is unknown, or when
    /// the disposition targets an unknown column or the column itself.
    pub fn delete_column(
        &mut self,
        column_id: &ColumnId,
        disposition: &ColumnDisposition,
    ) -> BoardResult<()> {
        self.commit(|board| {
            let position = board
                .columns
                .iter()
                .position(|column| column.id() == column_id)
                .ok_or_else(|| BoardError::not_found(Entity::Column, column_id))?;
            let mut removed = board.columns.remove(position);
            let orphaned = removed.take_task_ids();

            match disposition {
                ColumnDisposition::CascadeDeleteTasks => {
                    for task_id in &orphaned {
                        board.tasks.remove(task_id);
                    }
                }
                ColumnDisposition::MoveTasksTo(target_id) => {
                    // The deleted column is already gone, so naming it here
                    // resolves to NotFound like any unknown column.
                    let target = board.column_mut(target_id)?;
                    for task_id in orphaned {
                        target.push(task_id);
                    }
                }
            }
            Ok(())
        })
    }

    /// Runs `op` on a working copy and commits it when the invariants hold.
    fn commit<T>(&mut self, op: impl FnOnce(&mut Self) -> BoardResult<T>) -> BoardResult<T> {
        let mut working = self.clone();
        let outcome = op(&mut working)?;
        working.check_invariants()?;
        *self = working;
        Ok(outcome)
    }

    fn relocate(
        &mut self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        resolve_index: impl FnOnce(usize) -> BoardResult<usize>,
    ) -> BoardResult<()> {
        self.commit(|board| {
            if !board.tasks.contains_key(task_id) {
                return Err(BoardError::not_found(Entity::Task, task_id));
            }
            board.require_column(target_column_id)?;

            for column in &mut board.columns {
                column.remove(task_id);
            }
            let target = board.column_mut(target_column_id)?;
            let index = resolve_index(target.len())?;
            target.insert(index, task_id.clone());
            Ok(())
        })
    }

    fn require_column(&self, column_id: &ColumnId) -> BoardResult<()> {
        self.column(column_id)
            .map(|_| ())
            .ok_or_else(|| BoardError::not_found(Entity::Column, column_id))
    }

    fn column_mut(&mut self, column_id: &ColumnId) -> BoardResult<&mut Column> {
        self.columns
            .iter_mut()
            .find(|column| column.id() == column_id)
            .ok_or_else(|| BoardError::not_found(Entity::Column, column_id))
    }

    fn fresh_task_id(&self, ids: &impl IdGenerator) -> BoardResult<TaskId> {
        let attempts = self.tasks.len().saturating_add(MAX_ID_ATTEMPTS);
        for _ in 0..attempts {
            let candidate = TaskId::new(ids.next_id(Entity::Task))?;
            let in_use = self.tasks.contains_key(&candidate)
                || self.columns.iter().any(|column| column.contains(&candidate));
            if !in_use {
                return Ok(candidate);
            }
        }
        Err(BoardError::invariant(
            "tasks",
            "id generator did not yield an unused task id",
        ))
    }

    fn fresh_column_id(&self, ids: &impl IdGenerator) -> BoardResult<ColumnId> {
        let attempts = self.columns.len().saturating_add(MAX_ID_ATTEMPTS);
        for _ in 0..attempts {
            let candidate = ColumnId::new(ids.next_id(Entity::Column))?;
            if self.column(&candidate).is_none() {
                return Ok(candidate);
            }
        }
        Err(BoardError::invariant(
            "columns",
            "id generator did not yield an unused column id",
        ))
    }
}

fn column_name(name: &str) -> BoardResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BoardError::invalid_input(
            "name",
            "column name must not be empty",
        ));
    }
    Ok(trimmed.to_owned())
}
