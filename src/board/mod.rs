//! Task board: columns of ordered task references and the task records
//! they point to.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types and the mutation API in [`domain`]
//! - The exchange document and import validation in [`document`]
//! - Board seeding and identifier settings in [`config`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The serialising board owner in [`services`]

pub mod adapters;
pub mod config;
pub mod document;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
