pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use common::http::{cors_layer, not_found};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Programming API",
        version = "1.0.0",
        description = "Read-only access to assignments, scores and grading results"
    ),
    tags(
        (name = "Assignments", description = "Assignment progression and scores"),
        (name = "Grading", description = "Grading results"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::api_routes())
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
