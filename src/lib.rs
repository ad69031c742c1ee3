//! Kanban: task board state model.
//!
//! This crate models a task board whose columns hold ordered task
//! references and whose tasks carry a title, description, priority, due
//! date, tags and completion flag. Boards change only through validated,
//! all-or-nothing mutations or through a validated whole-document import.
//!
//! # Architecture
//!
//! Kanban follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, JSON files)
//!
//! # Modules
//!
//! - [`board`]: Board model, exchange document, storage ports and service

pub mod board;
