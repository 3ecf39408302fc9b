//! Catalog Server - library lending and entity catalogs over GraphQL

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_server::{api, config::AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("catalog_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    let addr = SocketAddr::new(
        config.server.host.parse().context("invalid server host")?,
        config.server.port,
    );

    let state = AppState::new(config);
    let graphql = state.config.graphql.clone();
    tracing::info!(
        seed = state.config.library.seed,
        return_policy = ?state.config.library.return_policy,
        "library catalog ready"
    );

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Library GraphQL endpoint: http://{}{}", addr, graphql.library_path);
    tracing::info!("Entities GraphQL endpoint: http://{}{}", addr, graphql.entities_path);
    tracing::info!(r#"Try: {{ books {{ id title author available }} }}"#);
    tracing::info!(r#"Try: mutation {{ borrowBook(userId: "1", bookId: "1") {{ id title available }} }}"#);

    axum::serve(listener, app).await?;

    Ok(())
}
