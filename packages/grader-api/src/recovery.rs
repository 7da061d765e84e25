use std::time::Duration;

use anyhow::anyhow;
use chrono::Utc;
use common::store;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::queue::{GradingJob, GradingQueue};

/// Requeue every `pending` submission untouched for at least `stale_after`.
///
/// Run once on boot, after the queue has started, to pick up work a previous
/// process accepted but never finished. Returns the number requeued.
pub async fn requeue_stale_pending(
    db: &DatabaseConnection,
    queue: &GradingQueue,
    stale_after: Duration,
) -> anyhow::Result<usize> {
    let threshold = chrono::Duration::from_std(stale_after)
        .ok()
        .and_then(|age| Utc::now().checked_sub_signed(age))
        .ok_or_else(|| {
            anyhow!(
                "recovery.stale_after_secs out of range: {}",
                stale_after.as_secs()
            )
        })?;
    let stale = store::stale_pending(db, threshold).await?;

    if stale.is_empty() {
        return Ok(0);
    }

    for submission in &stale {
        queue.enqueue(GradingJob::new(submission.id))?;
    }

    info!(
        count = stale.len(),
        stale_after_secs = stale_after.as_secs(),
        "Requeued pending submissions"
    );

    Ok(stale.len())
}
