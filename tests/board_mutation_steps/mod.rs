//! Step definitions for board mutation scenarios.

mod given;
mod then;
mod when;
pub mod world;
