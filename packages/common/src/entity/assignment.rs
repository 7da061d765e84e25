use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An ordered programming exercise. Rows are written only by the seeder.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "programming_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub assignment_order: i32,
    #[sea_orm(column_type = "Text")]
    pub handout: String, // in Markdown
    /// Test code handed to the grader together with the submitted answer.
    #[sea_orm(column_type = "Text")]
    pub test_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
