use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::assignment::get_next_assignment))
        .routes(routes!(handlers::score::get_finished_count))
        .routes(routes!(handlers::grading::get_grading_status))
}
