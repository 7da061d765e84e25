use anyhow::anyhow;
use common::store;
use sea_orm::DatabaseConnection;
use tracing::{debug, error, info, instrument, warn};

use crate::invoker::Grader;
use crate::queue::GradingJob;

/// Sentinel the grader prints as its final line when every test passed.
pub const PASS_SENTINEL: &str = "OK";

/// True when the last line of the grader output is exactly `OK`.
///
/// Trailing whitespace (including the final newline) is ignored.
pub fn is_passing(output: &str) -> bool {
    output.trim_end().lines().last() == Some(PASS_SENTINEL)
}

/// Grade one queued submission.
///
/// Failures are logged and swallowed; the submission then stays `pending`
/// until the next boot-time recovery scan picks it up.
#[instrument(skip_all, fields(submission_id = job.submission_id))]
pub async fn grade_submission(db: &DatabaseConnection, grader: &dyn Grader, job: &GradingJob) {
    if let Err(e) = try_grade(db, grader, job).await {
        error!(error = %e, "Grading failed, submission left pending");
    }
}

async fn try_grade(
    db: &DatabaseConnection,
    grader: &dyn Grader,
    job: &GradingJob,
) -> anyhow::Result<()> {
    let submission = store::find_submission(db, job.submission_id)
        .await?
        .ok_or_else(|| anyhow!("Submission {} not found", job.submission_id))?;

    if submission.status.is_final() {
        debug!("Submission already processed, skipping");
        return Ok(());
    }

    let test_code = store::test_code(db, submission.programming_assignment_id)
        .await?
        .ok_or_else(|| {
            anyhow!(
                "Assignment {} not found",
                submission.programming_assignment_id
            )
        })?;

    let output = grader.grade(&submission.code, &test_code).await?;
    let correct = is_passing(&output);

    if store::mark_processed(db, submission.id, correct, &output).await? {
        info!(
            assignment_id = submission.programming_assignment_id,
            correct, "Submission graded"
        );
    } else {
        warn!("Submission was processed concurrently, result discarded");
    }

    Ok(())
}
