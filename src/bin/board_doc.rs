//! Checks or summarises a board document file.
//!
//! Usage:
//!
//! ```text
//! board_doc <check|summary> <document-path>
//! ```
//!
//! `check` validates the document and reports the first violation found.
//! `summary` additionally lists every column with its tasks. Set `RUST_LOG`
//! to adjust log verbosity; the default level is `warn`.

use camino::{Utf8Path, Utf8PathBuf};
use kanban::board::{
    adapters::JsonFileBoardStore,
    document::validate_and_build,
    domain::{Board, BoardError},
    ports::{BoardStore, BoardStoreError},
};
use std::env;
use std::io::{self, Write};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while inspecting a document.
#[derive(Debug, Error)]
enum DocError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error("failed to read document: {0}")]
    Store(#[from] BoardStoreError),
    #[error("no document found at {0}")]
    Missing(Utf8PathBuf),
    #[error("document rejected: {0}")]
    Invalid(#[from] BoardError),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Check,
    Summary,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, DocError> {
        match arg {
            "check" => Ok(Self::Check),
            "summary" => Ok(Self::Summary),
            other => Err(DocError::InvalidArgs(format!(
                "unknown operation '{other}'; expected check or summary"
            ))),
        }
    }
}

fn main() -> Result<(), BoxError> {
    init_logging();
    let args = collect_args()?;
    run(args.into_iter()).map_err(Into::into)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn collect_args() -> Result<Vec<String>, DocError> {
    env::args_os()
        .map(|arg_os| {
            arg_os
                .into_string()
                .map_err(|_| DocError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn run(args: impl Iterator<Item = String>) -> Result<(), DocError> {
    let (operation, path) = parse_args(args)?;
    debug!(?operation, %path, "inspecting board document");
    let board = load_board(&path)?;
    info!(
        columns = board.columns().len(),
        tasks = board.tasks().len(),
        "document is valid"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, operation, &path, &board).map_err(DocError::Output)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Operation, Utf8PathBuf), DocError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| DocError::InvalidArgs("missing operation argument".into()))
        .and_then(|arg| Operation::parse(&arg))?;
    let path = args
        .next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| DocError::InvalidArgs("missing document path argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(DocError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    Ok((operation, path))
}

fn load_board(path: &Utf8Path) -> Result<Board, DocError> {
    let store = JsonFileBoardStore::open_ambient(path)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DocError::RuntimeInit)?;
    let document = runtime
        .block_on(store.load())?
        .ok_or_else(|| DocError::Missing(path.to_owned()))?;
    Ok(validate_and_build(&document)?)
}

fn write_report(
    out: &mut impl Write,
    operation: Operation,
    path: &Utf8Path,
    board: &Board,
) -> io::Result<()> {
    writeln!(
        out,
        "{path}: ok ({} columns, {} tasks)",
        board.columns().len(),
        board.tasks().len()
    )?;
    if operation == Operation::Check {
        return Ok(());
    }

    for column in board.columns() {
        writeln!(out, "{} [{}] ({})", column.name(), column.id(), column.len())?;
        for task_id in column.task_ids() {
            let Some(task) = board.task(task_id) else {
                continue;
            };
            let mark = if task.is_done() { 'x' } else { ' ' };
            let due = task
                .due()
                .map(|due| format!(" due {due}"))
                .unwrap_or_default();
            writeln!(
                out,
                "  [{mark}] {} ({}, {}){due}",
                task.title(),
                task_id,
                task.priority()
            )?;
        }
    }
    Ok(())
}
