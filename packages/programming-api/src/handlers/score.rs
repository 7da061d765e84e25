use axum::Json;
use axum::extract::{Path, State};
use common::http::error::{AppError, ErrorBody};
use common::store;
use tracing::instrument;

use crate::state::AppState;

/// Count the assignments the user has solved.
#[utoipa::path(
    get,
    path = "/scores/{user_uuid}",
    tag = "Assignments",
    operation_id = "getFinishedCount",
    summary = "Get the number of solved assignments",
    params(
        ("user_uuid" = String, Path, description = "Opaque user identifier")
    ),
    responses(
        (status = 200, description = "Number of distinct assignments with a correct submission", body = u64),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_finished_count(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
) -> Result<Json<u64>, AppError> {
    Ok(Json(store::finished_count(&state.db, &user_uuid).await?))
}
