//! Business logic services

pub mod entities;
pub mod library;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub library: library::LibraryService,
    pub entities: entities::EntitiesService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            library: library::LibraryService::new(repository.clone()),
            entities: entities::EntitiesService::new(repository.clone()),
            repository,
        }
    }

    /// Restore every store to its startup contents
    pub async fn reset(&self) {
        self.repository.reset().await;
        tracing::info!("catalog stores reset");
    }
}
