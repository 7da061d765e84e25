use std::path::Path;

use anyhow::Context;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use serde::Deserialize;
use tracing::info;

use crate::entity::assignment;

/// One assignment as written in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentSeed {
    pub id: i32,
    pub title: String,
    pub assignment_order: i32,
    #[serde(default)]
    pub handout: String,
    pub test_code: String,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default, rename = "assignment")]
    assignments: Vec<AssignmentSeed>,
}

/// Parse a seed file of the form:
///
/// ```toml
/// [[assignment]]
/// id = 1
/// title = "Hello"
/// assignment_order = 1
/// handout = "Write a function `hello` that returns \"Hello\"."
/// test_code = "..."
/// ```
pub fn parse_seed(content: &str) -> anyhow::Result<Vec<AssignmentSeed>> {
    let file: SeedFile = toml::from_str(content).context("Invalid assignment seed file")?;
    Ok(file.assignments)
}

pub fn load_seed_file(path: &Path) -> anyhow::Result<Vec<AssignmentSeed>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    parse_seed(&content)
}

/// Insert assignments that are not present yet. Returns the number inserted.
pub async fn seed_assignments<C: ConnectionTrait>(
    db: &C,
    seeds: &[AssignmentSeed],
) -> Result<u64, DbErr> {
    let mut inserted = 0u64;

    for seed in seeds {
        let model = assignment::ActiveModel {
            id: Set(seed.id),
            title: Set(seed.title.clone()),
            assignment_order: Set(seed.assignment_order),
            handout: Set(seed.handout.clone()),
            test_code: Set(seed.test_code.clone()),
        };

        let result = assignment::Entity::insert(model)
            .on_conflict(
                OnConflict::column(assignment::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(rows) => inserted += rows,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new assignments", inserted);
    }

    Ok(inserted)
}
