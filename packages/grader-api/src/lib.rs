pub mod config;
pub mod grading;
pub mod handlers;
pub mod invoker;
pub mod models;
pub mod queue;
pub mod recovery;
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
        title = "Grader API",
        version = "1.0.0",
        description = "Accepts programming assignment submissions and queues them for grading"
    ),
    tags(
        (name = "Grader", description = "Submission intake"),
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
