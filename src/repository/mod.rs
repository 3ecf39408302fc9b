//! Repository layer: in-memory stores owned by the running service

pub mod entities;
pub mod library;
mod seed;

use async_graphql::ID;

use crate::config::{AppConfig, ReturnPolicy};

/// Monotonic id generator, independent of the current collection size
#[derive(Debug, Default, Clone)]
pub(crate) struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// Sequence whose next id is `last + 1`
    pub fn after(last: u64) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> ID {
        self.last += 1;
        ID::from(self.last.to_string())
    }
}

/// Main repository struct holding both catalogs
#[derive(Clone)]
pub struct Repository {
    pub library: library::LibraryRepository,
    pub entities: entities::EntitiesRepository,
}

impl Repository {
    /// Create both stores as described by the configuration
    pub fn new(config: &AppConfig) -> Self {
        Self {
            library: library::LibraryRepository::new(
                config.library.seed,
                config.library.return_policy,
            ),
            entities: entities::EntitiesRepository::new(config.entities.seed),
        }
    }

    /// Seeded stores with default policies
    pub fn seeded() -> Self {
        Self {
            library: library::LibraryRepository::new(true, ReturnPolicy::AnyUser),
            entities: entities::EntitiesRepository::new(true),
        }
    }

    /// Restore both stores to their startup contents
    pub async fn reset(&self) {
        self.library.reset().await;
        self.entities.reset().await;
    }
}
