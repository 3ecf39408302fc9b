//! Configuration management for the catalog server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GraphqlConfig {
    /// Endpoint serving the library lending schema
    pub library_path: String,
    /// Endpoint serving the users/posts/products schema
    pub entities_path: String,
    pub introspection: bool,
    /// Serve the GraphiQL explorer on GET requests
    pub graphiql: bool,
}

/// Who may return a borrowed book
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReturnPolicy {
    /// Any user may release any held book
    #[default]
    AnyUser,
    /// Only the user holding the book may return it
    BorrowerOnly,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LibraryConfig {
    /// Load the demo books and users at startup
    pub seed: bool,
    pub return_policy: ReturnPolicy,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EntitiesConfig {
    pub seed: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub graphql: GraphqlConfig,
    pub library: LibraryConfig,
    pub entities: EntitiesConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // CATALOG_SERVER__PORT=5000, CATALOG_LIBRARY__RETURN_POLICY=borrower_only, ...
            .add_source(
                Environment::with_prefix("CATALOG")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "server.port",
                env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok()),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            library_path: "/graphql".to_string(),
            entities_path: "/entities/graphql".to_string(),
            introspection: true,
            graphiql: true,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            seed: true,
            return_policy: ReturnPolicy::default(),
        }
    }
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self { seed: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
