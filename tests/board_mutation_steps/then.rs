//! Then steps for board mutation BDD scenarios.

use super::world::BoardWorld;
use kanban::board::{
    domain::{Board, Column, ColumnId},
    services::BoardServiceError,
};
use rstest_bdd_macros::then;

fn live_column(board: &Board, column: &str) -> Result<Column, eyre::Report> {
    let column_id = ColumnId::new(column)?;
    board
        .column(&column_id)
        .cloned()
        .ok_or_else(|| eyre::eyre!("column '{column}' is missing"))
}

#[then(r#"the board has no column "{column}""#)]
fn board_has_no_column(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let board = world.service.snapshot()?;
    eyre::ensure!(
        board.column(&ColumnId::new(column.as_str())?).is_none(),
        "column '{column}' still exists"
    );
    Ok(())
}

#[then(r#"column "{column}" lists "{titles}""#)]
fn column_lists(world: &BoardWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let board = world.service.snapshot()?;
    let listed = live_column(&board, &column)?
        .task_ids()
        .iter()
        .map(|task_id| {
            board
                .task(task_id)
                .map(|task| task.title().to_string())
                .ok_or_else(|| eyre::eyre!("column '{column}' references missing task {task_id}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let expected: Vec<&str> = titles.split(',').map(str::trim).collect();

    eyre::ensure!(
        listed == expected,
        "expected column '{column}' to list {expected:?}, found {listed:?}"
    );
    Ok(())
}

#[then(r#"column "{column}" holds {count:u64} tasks"#)]
fn column_holds(world: &BoardWorld, column: String, count: u64) -> Result<(), eyre::Report> {
    let board = world.service.snapshot()?;
    let len = live_column(&board, &column)?.len();
    eyre::ensure!(
        u64::try_from(len)? == count,
        "expected {count} tasks in column '{column}', found {len}"
    );
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &BoardWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    match result {
        Err(BoardServiceError::Board(err)) if format!("{:?}", err.kind()) == kind => Ok(()),
        other => Err(eyre::eyre!("expected a {kind} error, got {other:?}")),
    }
}

#[then(r#"task "{title}" has no due date"#)]
fn task_has_no_due_date(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let board = world.service.snapshot()?;
    let task = board
        .task(&task_id)
        .ok_or_else(|| eyre::eyre!("task '{title}' is missing"))?;
    eyre::ensure!(
        task.due().is_none(),
        "task '{title}' has due date {:?}",
        task.due()
    );
    Ok(())
}

#[then("the board is unchanged")]
fn board_is_unchanged(world: &BoardWorld) -> Result<(), eyre::Report> {
    let before = world
        .board_before
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no board recorded before the operation"))?;
    eyre::ensure!(
        &world.service.snapshot()? == before,
        "board changed after a failed operation"
    );
    Ok(())
}
