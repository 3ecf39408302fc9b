//! OpenAPI documentation for the REST probes
//!
//! The GraphQL endpoints describe themselves through introspection.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::health;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Server",
        version = "0.1.0",
        description = "Health probes of the library and entity GraphQL catalogs"
    ),
    paths(
        health::health_check,
        health::readiness_check,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
