//! Process-wide grading queue.
//!
//! One worker task drains an unbounded channel, so at most one grading runs
//! at a time and jobs run in the order they were enqueued. Nothing here is
//! persisted: jobs still queued when the process stops are lost, and their
//! submissions stay `pending` until the recovery scan on the next boot.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sea_orm::DatabaseConnection;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::grading::grade_submission;
use crate::invoker::Grader;

/// A unit of work: grade this submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingJob {
    pub submission_id: i32,
}

impl GradingJob {
    pub fn new(submission_id: i32) -> Self {
        Self { submission_id }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("grading queue is stopped")]
    Stopped,
}

/// Handle to the grading queue. Cheap to clone.
#[derive(Clone)]
pub struct GradingQueue {
    tx: mpsc::UnboundedSender<GradingJob>,
    waiting: Arc<AtomicUsize>,
    shutdown: CancellationToken,
}

impl GradingQueue {
    /// Spawn the single worker and return the queue handle with the worker's
    /// join handle.
    pub fn start(db: DatabaseConnection, grader: Arc<dyn Grader>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let waiting = Arc::new(AtomicUsize::new(0));
        let shutdown = CancellationToken::new();

        let worker = tokio::spawn(run_worker(
            rx,
            db,
            grader,
            Arc::clone(&waiting),
            shutdown.clone(),
        ));

        (
            Self {
                tx,
                waiting,
                shutdown,
            },
            worker,
        )
    }

    pub fn enqueue(&self, job: GradingJob) -> Result<(), QueueError> {
        if self.shutdown.is_cancelled() {
            return Err(QueueError::Stopped);
        }

        self.waiting.fetch_add(1, Ordering::SeqCst);
        self.tx.send(job).map_err(|_| {
            self.waiting.fetch_sub(1, Ordering::SeqCst);
            QueueError::Stopped
        })
    }

    /// Jobs waiting to start. The job being graded is not counted.
    pub fn len(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop accepting jobs. The worker finishes the job in flight, then exits
    /// without starting the rest.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<GradingJob>,
    db: DatabaseConnection,
    grader: Arc<dyn Grader>,
    waiting: Arc<AtomicUsize>,
    shutdown: CancellationToken,
) {
    info!("Starting grading worker");

    loop {
        let job = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            job = rx.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        waiting.fetch_sub(1, Ordering::SeqCst);
        grade_submission(&db, grader.as_ref(), &job).await;
    }

    let dropped = waiting.load(Ordering::SeqCst);
    if dropped > 0 {
        warn!(dropped, "Grading worker stopped with jobs still queued");
    }
    info!("Grading worker stopped");
}
