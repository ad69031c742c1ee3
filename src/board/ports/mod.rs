//! Port contracts for the board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.
//! Identifier generation is a domain seam and lives with the identifier
//! types as [`IdGenerator`](crate::board::domain::IdGenerator).

pub mod store;

pub use store::{BoardStore, BoardStoreError, BoardStoreResult};

#[cfg(test)]
pub use store::MockBoardStore;
