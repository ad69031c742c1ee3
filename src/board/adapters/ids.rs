//! Identifier generators.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::board::{
    config::BoardConfig,
    domain::{Entity, IdGenerator},
};

/// Number of hex digits kept from each random UUID.
const RANDOM_SUFFIX_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Prefixes {
    task: String,
    column: String,
}

impl Prefixes {
    fn from_config(config: &BoardConfig) -> Self {
        Self {
            task: config.task_id_prefix.clone(),
            column: config.column_id_prefix.clone(),
        }
    }

    fn for_entity(&self, entity: Entity) -> &str {
        match entity {
            Entity::Task => &self.task,
            Entity::Column => &self.column,
        }
    }
}

/// Generates identifiers such as `t-1f3a9c2e` from random v4 UUIDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomIdGenerator {
    prefixes: Prefixes,
}

impl RandomIdGenerator {
    /// Creates a generator with the default `t` and `c` prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&BoardConfig::default())
    }

    /// Creates a generator using the configured prefixes.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            prefixes: Prefixes::from_config(config),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self, entity: Entity) -> String {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(RANDOM_SUFFIX_LEN)
            .collect();
        format!("{}-{suffix}", self.prefixes.for_entity(entity))
    }
}

/// Generates predictable identifiers (`t1`, `t2`, `c1`, ...).
///
/// Task and column counters advance independently.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefixes: Prefixes,
    tasks: AtomicU64,
    columns: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator with the default `t` and `c` prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&BoardConfig::default())
    }

    /// Creates a generator using the configured prefixes.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            prefixes: Prefixes::from_config(config),
            tasks: AtomicU64::new(0),
            columns: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, entity: Entity) -> String {
        let counter = match entity {
            Entity::Task => &self.tasks,
            Entity::Column => &self.columns,
        };
        let sequence = counter.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        format!("{}{sequence}", self.prefixes.for_entity(entity))
    }
}
