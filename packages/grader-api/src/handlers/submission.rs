use axum::Json;
use axum::extract::State;
use common::http::error::{AppError, ErrorBody};
use common::http::json::AppJson;
use common::store::{self, InsertError};
use tracing::{debug, info, instrument, warn};

use crate::models::submission::*;
use crate::queue::GradingJob;
use crate::state::AppState;

/// Submit an answer for the user's current assignment.
#[utoipa::path(
    post,
    path = "/submit/answer",
    tag = "Grader",
    operation_id = "submitAnswer",
    summary = "Submit an answer for grading",
    description = "Targets the user's next unsolved assignment. An answer identical to an earlier one for the same assignment returns the earlier submission id without grading again. A user with a pending submission gets a `failed` status. Otherwise a pending submission is created and queued for grading.",
    request_body = SubmitAnswerRequest,
    responses(
        (status = 200, description = "Submission accepted, deduplicated, or rejected (see `status`)", body = SubmitAnswerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all)]
pub async fn submit_answer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    validate_submit_answer(&payload, state.config.submission.max_size)?;
    let user_uuid = payload.user_uuid.as_str();

    let Some(assignment) = store::next_assignment(&state.db, user_uuid).await? else {
        info!(user_uuid, "Submission from user who completed every assignment");
        return Ok(Json(SubmitAnswerResponse::failed(COMPLETED_MSG)));
    };

    if let Some(id) = store::find_duplicate(
        &state.db,
        assignment.id,
        user_uuid,
        &payload.answer,
        state.config.submission.dedup_scope,
    )
    .await?
    {
        debug!(
            user_uuid,
            assignment_id = assignment.id,
            submission_id = id,
            "Identical answer already submitted"
        );
        return Ok(Json(SubmitAnswerResponse::Success { id }));
    }

    if store::has_pending(&state.db, user_uuid).await? {
        debug!(user_uuid, "User already has a pending submission");
        return Ok(Json(SubmitAnswerResponse::failed(PENDING_MSG)));
    }

    let submission =
        match store::insert_pending(&state.db, assignment.id, user_uuid, &payload.answer).await {
            Ok(model) => model,
            Err(InsertError::PendingExists) => {
                debug!(user_uuid, "Lost race against a concurrent submission");
                return Ok(Json(SubmitAnswerResponse::failed(PENDING_MSG)));
            }
            Err(InsertError::Db(e)) => return Err(e.into()),
        };

    match state.queue.enqueue(GradingJob::new(submission.id)) {
        Ok(()) => info!(
            user_uuid,
            assignment_id = assignment.id,
            submission_id = submission.id,
            queued = state.queue.len(),
            "Submission queued for grading"
        ),
        Err(e) => warn!(
            submission_id = submission.id,
            error = %e,
            "Failed to enqueue grading job, submission left pending"
        ),
    }

    Ok(Json(SubmitAnswerResponse::Success { id: submission.id }))
}
