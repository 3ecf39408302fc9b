//! Catalog Server
//!
//! Two in-memory catalogs served over GraphQL: a library lending catalog
//! (books, members, borrow/return) and an entity catalog (users, posts,
//! products).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::{entities::EntitiesSchema, library::LibrarySchema};
use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
    pub library_schema: LibrarySchema,
    pub entities_schema: EntitiesSchema,
}

impl AppState {
    /// Create fresh stores and schemas for the given configuration
    pub fn new(config: AppConfig) -> Self {
        let repository = Repository::new(&config);
        let services = Services::new(repository);

        let library_schema = api::library::build_schema(services.library.clone(), &config.graphql);
        let entities_schema =
            api::entities::build_schema(services.entities.clone(), &config.graphql);

        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            library_schema,
            entities_schema,
        }
    }
}
