use common::entity::assignment;
use serde::Serialize;

/// A programming assignment.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AssignmentResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Hello world")]
    pub title: String,
    #[schema(example = 1)]
    pub assignment_order: i32,
    /// Assignment description in Markdown.
    pub handout: String,
    /// Test code the answer is graded against.
    pub test_code: String,
}

impl From<assignment::Model> for AssignmentResponse {
    fn from(model: assignment::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            assignment_order: model.assignment_order,
            handout: model.handout,
            test_code: model.test_code,
        }
    }
}
