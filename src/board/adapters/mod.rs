//! Adapter implementations for board ports.

pub mod file;
pub mod ids;
pub mod memory;

pub use file::JsonFileBoardStore;
pub use ids::{RandomIdGenerator, SequentialIdGenerator};
pub use memory::InMemoryBoardStore;
