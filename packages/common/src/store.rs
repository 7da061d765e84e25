//! Typed data access shared by both services.
//!
//! Every query here is parameterized through sea-orm; callers never build SQL
//! strings themselves.

use chrono::{DateTime, Utc};
use sea_orm::*;
use serde::Deserialize;
use thiserror::Error;

use crate::SubmissionStatus;
use crate::entity::{assignment, submission};

/// Which earlier submissions count as duplicates of a new answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupScope {
    /// Any submission to the same assignment with identical code, whoever sent it.
    #[default]
    Assignment,
    /// Only the same user's submissions to the same assignment.
    User,
}

#[derive(Debug, Error)]
pub enum InsertError {
    /// The one-pending-per-user index rejected the row.
    #[error("user already has a pending submission")]
    PendingExists,

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Lowest-id assignment the user has not yet solved, or `None` once every
/// assignment has a correct submission.
pub async fn next_assignment<C: ConnectionTrait>(
    db: &C,
    user_uuid: &str,
) -> Result<Option<assignment::Model>, DbErr> {
    let solved = submission::Entity::find()
        .select_only()
        .column(submission::Column::ProgrammingAssignmentId)
        .filter(submission::Column::UserUuid.eq(user_uuid))
        .filter(submission::Column::Correct.eq(true))
        .into_query();

    assignment::Entity::find()
        .filter(assignment::Column::Id.not_in_subquery(solved))
        .order_by_asc(assignment::Column::Id)
        .one(db)
        .await
}

/// Test code for an assignment.
pub async fn test_code<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<String>, DbErr> {
    assignment::Entity::find_by_id(id)
        .select_only()
        .column(assignment::Column::TestCode)
        .into_tuple::<String>()
        .one(db)
        .await
}

/// Id of the oldest submission with byte-identical code for the assignment.
///
/// The status of the matching submission is not considered.
pub async fn find_duplicate<C: ConnectionTrait>(
    db: &C,
    assignment_id: i32,
    user_uuid: &str,
    code: &str,
    scope: DedupScope,
) -> Result<Option<i32>, DbErr> {
    let mut select = submission::Entity::find()
        .select_only()
        .column(submission::Column::Id)
        .filter(submission::Column::ProgrammingAssignmentId.eq(assignment_id))
        .filter(submission::Column::Code.eq(code));

    if scope == DedupScope::User {
        select = select.filter(submission::Column::UserUuid.eq(user_uuid));
    }

    select
        .order_by_asc(submission::Column::Id)
        .into_tuple::<i32>()
        .one(db)
        .await
}

pub async fn has_pending<C: ConnectionTrait>(db: &C, user_uuid: &str) -> Result<bool, DbErr> {
    let count = submission::Entity::find()
        .filter(submission::Column::UserUuid.eq(user_uuid))
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Insert a new `pending` submission.
pub async fn insert_pending<C: ConnectionTrait>(
    db: &C,
    assignment_id: i32,
    user_uuid: &str,
    code: &str,
) -> Result<submission::Model, InsertError> {
    let model = submission::ActiveModel {
        programming_assignment_id: Set(assignment_id),
        user_uuid: Set(user_uuid.to_string()),
        code: Set(code.to_string()),
        status: Set(SubmissionStatus::Pending),
        correct: Set(None),
        grader_feedback: Set(None),
        last_updated: Set(Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => InsertError::PendingExists,
        _ => InsertError::Db(err),
    })
}

/// Move a submission from `pending` to `processed`.
///
/// Returns `false` when the row was missing or already processed, so a
/// submission that was queued twice is only ever written once.
pub async fn mark_processed<C: ConnectionTrait>(
    db: &C,
    id: i32,
    correct: bool,
    grader_feedback: &str,
) -> Result<bool, DbErr> {
    let update = submission::ActiveModel {
        status: Set(SubmissionStatus::Processed),
        correct: Set(Some(correct)),
        grader_feedback: Set(Some(grader_feedback.to_string())),
        last_updated: Set(Utc::now()),
        ..Default::default()
    };

    let result = submission::Entity::update_many()
        .set(update)
        .filter(submission::Column::Id.eq(id))
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Number of distinct assignments the user has solved.
pub async fn finished_count<C: ConnectionTrait>(db: &C, user_uuid: &str) -> Result<u64, DbErr> {
    submission::Entity::find()
        .select_only()
        .column(submission::Column::ProgrammingAssignmentId)
        .distinct()
        .filter(submission::Column::UserUuid.eq(user_uuid))
        .filter(submission::Column::Correct.eq(true))
        .count(db)
        .await
}

pub async fn find_submission<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<submission::Model>, DbErr> {
    submission::Entity::find_by_id(id).one(db).await
}

/// Pending submissions last touched before `threshold`, oldest id first.
pub async fn stale_pending<C: ConnectionTrait>(
    db: &C,
    threshold: DateTime<Utc>,
) -> Result<Vec<submission::Model>, DbErr> {
    submission::Entity::find()
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .filter(submission::Column::LastUpdated.lte(threshold))
        .order_by_asc(submission::Column::Id)
        .all(db)
        .await
}
