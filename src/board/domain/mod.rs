//! Domain model for the task board.
//!
//! The board domain holds columns, tasks and the rules that keep them
//! consistent. It performs no I/O; documents, storage and identifier
//! generation live behind the types re-exported here and in the sibling
//! modules.

mod board;
mod column;
mod error;
mod filter;
mod ids;
mod task;

pub use board::Board;
pub use column::{Column, ColumnDisposition};
pub use error::{BoardError, BoardErrorKind, BoardResult, Entity, ParsePriorityError};
pub use filter::{FilteredColumn, TaskFilter, filter_tasks};
pub use ids::{ColumnId, IdGenerator, TaskId};
pub use task::{DueDate, NewTask, Priority, Tags, Task, TaskPatch, TaskTitle};
