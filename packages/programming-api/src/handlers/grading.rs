use axum::Json;
use axum::extract::{Path, State};
use common::http::error::{AppError, ErrorBody};
use common::store;
use tracing::instrument;

use crate::models::grading::GradingStatusResponse;
use crate::state::AppState;

/// Get the grading status of a submission.
#[utoipa::path(
    get,
    path = "/grading/status/{id}",
    tag = "Grading",
    operation_id = "getGradingStatus",
    summary = "Get submission grading status",
    description = "Returns `{status: \"pending\"}` until graded, then the status with `correct` and `grader_feedback`.",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Grading status", body = GradingStatusResponse),
        (status = 400, description = "Malformed id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_grading_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GradingStatusResponse>, AppError> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid submission id '{id}'")))?;

    let submission = store::find_submission(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    Ok(Json(submission.into()))
}
