//! Board exchange document: export serializer and import validator.
//!
//! Export turns a [`Board`](crate::board::domain::Board) into a
//! [`BoardDocument`]; import runs an untrusted JSON value through
//! [`validate_and_build`] and yields a board only when every check passes.

mod model;
mod validation;

pub use model::{BoardDocument, ColumnRecord, TaskRecord};
pub use validation::{parse_and_build, validate_and_build};
