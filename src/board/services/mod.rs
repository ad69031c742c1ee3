//! Application services for the board.

mod session;

pub use session::{BoardService, BoardServiceError, BoardServiceResult};
