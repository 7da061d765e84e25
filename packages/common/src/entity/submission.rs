use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::SubmissionStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "programming_assignment_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub programming_assignment_id: i32,
    /// Opaque client identifier; there is no user table.
    pub user_uuid: String,
    /// The submitted answer, compared byte-for-byte for deduplication.
    #[sea_orm(column_type = "Text")]
    pub code: String,
    pub status: SubmissionStatus,

    /// NULL until processed.
    pub correct: Option<bool>,
    /// Raw grader output. NULL until processed.
    #[sea_orm(column_type = "Text", nullable)]
    pub grader_feedback: Option<String>,

    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::ProgrammingAssignmentId",
        to = "super::assignment::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
