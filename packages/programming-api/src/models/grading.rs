use common::SubmissionStatus;
use common::entity::submission;
use serde::Serialize;

/// Grading state of a submission. Results are only present once processed.
#[derive(Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GradingStatusResponse {
    Pending,
    Processed {
        correct: Option<bool>,
        /// Raw grader output.
        grader_feedback: Option<String>,
    },
}

impl From<submission::Model> for GradingStatusResponse {
    fn from(model: submission::Model) -> Self {
        match model.status {
            SubmissionStatus::Pending => Self::Pending,
            SubmissionStatus::Processed => Self::Processed {
                correct: model.correct,
                grader_feedback: model.grader_feedback,
            },
        }
    }
}
