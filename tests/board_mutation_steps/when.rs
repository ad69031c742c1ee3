//! When steps for board mutation BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use kanban::board::domain::{Board, ColumnDisposition, ColumnId, TaskPatch};
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"task "{title}" is moved to column "{column}" at position {index:u64}"#)]
fn move_task(
    world: &mut BoardWorld,
    title: String,
    column: String,
    index: u64,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let column_id = ColumnId::new(column)?;
    let position = usize::try_from(index).wrap_err("position fits in usize")?;
    world.record(|service| service.move_task(&task_id, &column_id, position))
}

#[when(r#"column "{column}" is deleted with its tasks"#)]
fn delete_column_cascading(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let column_id = ColumnId::new(column)?;
    world.record(|service| {
        service.delete_column(&column_id, &ColumnDisposition::CascadeDeleteTasks)
    })
}

#[when(r#"column "{column}" is deleted moving its tasks to "{target}""#)]
fn delete_column_moving(
    world: &mut BoardWorld,
    column: String,
    target: String,
) -> Result<(), eyre::Report> {
    let column_id = ColumnId::new(column)?;
    let disposition = ColumnDisposition::MoveTasksTo(ColumnId::new(target)?);
    world.record(|service| service.delete_column(&column_id, &disposition))
}

#[when(r#"task "{title}" is given the due date "{due}""#)]
fn set_due_date(world: &mut BoardWorld, title: String, due: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let patch = TaskPatch::new().with_due(due);
    world.record(|service| service.edit_task(&task_id, &patch))
}

#[when("a document referencing an unknown task is imported")]
fn import_unknown_reference(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let document = json!({
        "columns": [{ "id": "todo", "name": "To do", "task_ids": ["ghost"] }],
        "tasks": {}
    });
    world.record(|service| service.import_document(&document))
}

#[when("the board is saved and reloaded")]
fn save_and_reload(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.service.save()).wrap_err("save board")?;
    world.reset(Board::empty());
    let loaded = run_async(world.service.load()).wrap_err("reload board")?;
    eyre::ensure!(loaded, "store held no document after save");
    Ok(())
}
