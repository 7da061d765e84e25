use common::http::error::AppError;
use serde::{Deserialize, Serialize};

/// Longest accepted `user_uuid`.
pub const MAX_USER_UUID_LEN: usize = 256;

pub const PENDING_MSG: &str = "You have ongoing submission. Try again later";
pub const COMPLETED_MSG: &str = "All assignments have been completed";

/// Request body for submitting an answer.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitAnswerRequest {
    /// Opaque client identifier.
    #[schema(example = "7b9f6a0c-2f0e-4c47-9a52-2f1c1f0d3b11")]
    pub user_uuid: String,
    /// Answer source code.
    #[schema(example = "def hello():\n    return \"Hello\"")]
    pub answer: String,
}

/// Result of a submission attempt.
///
/// A rejected attempt is still a 200 response; `status` tells them apart.
#[derive(Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitAnswerResponse {
    /// Accepted, or an identical answer was already submitted.
    Success {
        #[schema(example = 1)]
        id: i32,
    },
    /// Not accepted; retry later.
    Failed {
        #[schema(example = "You have ongoing submission. Try again later")]
        msg: String,
    },
}

impl SubmitAnswerResponse {
    pub fn failed(msg: &str) -> Self {
        Self::Failed {
            msg: msg.to_string(),
        }
    }
}

pub fn validate_submit_answer(req: &SubmitAnswerRequest, max_size: usize) -> Result<(), AppError> {
    if req.user_uuid.trim().is_empty() {
        return Err(AppError::Validation("user_uuid must not be empty".into()));
    }
    if req.user_uuid.len() > MAX_USER_UUID_LEN {
        return Err(AppError::Validation(format!(
            "user_uuid must be at most {MAX_USER_UUID_LEN} characters"
        )));
    }
    if req.answer.len() > max_size {
        return Err(AppError::Validation(format!(
            "answer must be at most {max_size} bytes"
        )));
    }
    Ok(())
}
