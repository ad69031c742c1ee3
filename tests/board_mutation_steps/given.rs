//! Given steps for board mutation BDD scenarios.

use super::world::BoardWorld;
use eyre::WrapErr;
use kanban::board::{
    config::{BoardConfig, ColumnSeed},
    domain::{ColumnId, NewTask},
};
use rstest_bdd_macros::given;

#[given(r#"a board with columns "{first}" and "{second}""#)]
fn board_with_columns(
    world: &mut BoardWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let config = BoardConfig {
        default_columns: vec![
            ColumnSeed::new(first.as_str(), first.as_str()),
            ColumnSeed::new(second.as_str(), second.as_str()),
        ],
        ..BoardConfig::default()
    };
    let board = config.seed_board().wrap_err("seed scenario board")?;
    world.reset(board);
    Ok(())
}

#[given(r#"a task "{title}" in column "{column}""#)]
fn task_in_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = ColumnId::new(column)?;
    let task_id = world
        .service
        .add_task(&column_id, NewTask::new(title.as_str()))
        .wrap_err("add task in scenario setup")?;
    world.task_ids.insert(title, task_id);
    Ok(())
}
