//! HTTP surface: GraphQL endpoints, explorers and health probes

pub mod entities;
pub mod health;
pub mod library;
pub mod openapi;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let graphql = &state.config.graphql;
    // POST executes operations; GET serves GraphiQL when enabled
    let (library_route, entities_route) = if graphql.graphiql {
        (
            get(library_explorer).post(library_graphql),
            get(entities_explorer).post(entities_graphql),
        )
    } else {
        (post(library_graphql), post(entities_graphql))
    };

    let app = Router::new()
        .route("/", get(landing_page))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(&graphql.library_path, library_route)
        .route(&graphql.entities_path, entities_route)
        .with_state(state.clone());

    Router::new()
        .merge(app)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn library_graphql(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.library_schema.execute(req.into_inner()).await.into()
}

async fn entities_graphql(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.entities_schema.execute(req.into_inner()).await.into()
}

async fn library_explorer(State(state): State<AppState>) -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint(&state.config.graphql.library_path)
            .finish(),
    )
}

async fn entities_explorer(State(state): State<AppState>) -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint(&state.config.graphql.entities_path)
            .finish(),
    )
}

async fn landing_page(State(state): State<AppState>) -> Html<String> {
    let graphql = &state.config.graphql;
    Html(format!(
        r#"<h1>Catalog GraphQL Server</h1>
<ul>
  <li><a href="{library}">{library}</a> &mdash; library books, users and loans</li>
  <li><a href="{entities}">{entities}</a> &mdash; users, posts and products</li>
</ul>"#,
        library = graphql.library_path,
        entities = graphql.entities_path,
    ))
}
