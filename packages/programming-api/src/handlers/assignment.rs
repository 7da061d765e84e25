use axum::Json;
use axum::extract::{Path, State};
use common::http::error::{AppError, ErrorBody};
use common::store;
use tracing::instrument;

use crate::models::assignment::AssignmentResponse;
use crate::state::AppState;

/// Get the assignment the user should work on next.
#[utoipa::path(
    get,
    path = "/assignment/latest/{user_uuid}",
    tag = "Assignments",
    operation_id = "getNextAssignment",
    summary = "Get the user's next assignment",
    description = "Returns the lowest-id assignment the user has no correct submission for.",
    params(
        ("user_uuid" = String, Path, description = "Opaque user identifier")
    ),
    responses(
        (status = 200, description = "Next assignment", body = AssignmentResponse),
        (status = 404, description = "Every assignment solved (ASSIGNMENTS_COMPLETED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_next_assignment(
    State(state): State<AppState>,
    Path(user_uuid): Path<String>,
) -> Result<Json<AssignmentResponse>, AppError> {
    let assignment = store::next_assignment(&state.db, &user_uuid)
        .await?
        .ok_or(AppError::AssignmentsCompleted)?;

    Ok(Json(assignment.into()))
}
