//! Read-only task filtering over a board.

use super::{Board, Column, Priority, Task, TaskId};
use std::collections::BTreeSet;

/// Criteria for projecting a board onto matching tasks.
///
/// Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    title_contains: String,
    tags: BTreeSet<String>,
    priorities: BTreeSet<Priority>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps tasks whose title contains `needle`, ignoring case.
    ///
    /// Whitespace in `needle` is significant; only an empty needle matches
    /// every title.
    #[must_use]
    pub fn with_title_containing(mut self, needle: &str) -> Self {
        self.title_contains = needle.to_lowercase();
        self
    }

    /// Keeps tasks carrying at least one of `tags`.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }

    /// Keeps tasks with exactly this priority.
    #[must_use]
    pub fn with_priority(self, priority: Priority) -> Self {
        self.with_priorities([priority])
    }

    /// Keeps tasks whose priority is one of `priorities`.
    #[must_use]
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities = priorities.into_iter().collect();
        self
    }

    /// Returns `true` when `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let title_ok = self.title_contains.is_empty()
            || task
                .title()
                .as_str()
                .to_lowercase()
                .contains(&self.title_contains);
        let tags_ok = self.tags.is_empty() || task.tags().intersects(&self.tags);
        let priority_ok = self.priorities.is_empty() || self.priorities.contains(&task.priority());
        title_ok && tags_ok && priority_ok
    }
}

/// One column of a filtered projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredColumn<'a> {
    column: &'a Column,
    tasks: Vec<(&'a TaskId, &'a Task)>,
}

impl<'a> FilteredColumn<'a> {
    /// Returns the projected column.
    #[must_use]
    pub const fn column(&self) -> &'a Column {
        self.column
    }

    /// Returns the matching tasks in column order.
    #[must_use]
    pub fn tasks(&self) -> &[(&'a TaskId, &'a Task)] {
        &self.tasks
    }

    /// Returns the matching task identifiers in column order.
    pub fn task_ids(&self) -> impl Iterator<Item = &'a TaskId> + '_ {
        self.tasks.iter().map(|(task_id, _)| *task_id)
    }

    /// Returns the number of tasks in the column before filtering.
    #[must_use]
    pub fn total(&self) -> usize {
        self.column.len()
    }
}

/// Projects `board` onto the tasks matching `filter`.
///
/// Returns one entry per column in board order; each keeps the matching
/// tasks in their column order. The board itself is left untouched.
#[must_use]
pub fn filter_tasks<'a>(board: &'a Board, filter: &TaskFilter) -> Vec<FilteredColumn<'a>> {
    board
        .columns()
        .iter()
        .map(|column| FilteredColumn {
            column,
            tasks: column
                .task_ids()
                .iter()
                .filter_map(|task_id| {
                    board
                        .task(task_id)
                        .filter(|task| filter.matches(task))
                        .map(|task| (task_id, task))
                })
                .collect(),
        })
        .collect()
}
