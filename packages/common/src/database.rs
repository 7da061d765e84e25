use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::*;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::{assignment, submission};

/// Name of the partial unique index that allows one pending submission per user.
pub const PENDING_INDEX: &str = "idx_submission_one_pending_per_user";

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    create_tables(&db).await?;
    ensure_indexes(&db).await?;

    Ok(db)
}

/// Create both tables if they do not exist yet.
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut assignments = schema.create_table_from_entity(assignment::Entity);
    assignments.if_not_exists();
    db.execute_raw(backend.build(&assignments)).await?;

    let mut submissions = schema.create_table_from_entity(submission::Entity);
    submissions.if_not_exists();
    db.execute_raw(backend.build(&submissions)).await?;

    Ok(())
}

/// Ensure required database indexes exist.
///
/// The pending index is a partial unique index, which the schema builder
/// cannot express, so it is created from raw SQL. Postgres and SQLite accept
/// the same syntax.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    db.execute_unprepared(&format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {PENDING_INDEX} \
         ON programming_assignment_submissions (user_uuid) \
         WHERE status = 'pending'"
    ))
    .await?;
    info!("Ensured index {PENDING_INDEX} exists");

    // Next-assignment and finished-count lookups:
    // WHERE user_uuid = ? AND correct = TRUE
    let user_correct = Index::create()
        .if_not_exists()
        .name("idx_submission_user_correct")
        .table(submission::Entity)
        .col(submission::Column::UserUuid)
        .col(submission::Column::Correct)
        .to_owned();

    // Dedup lookup: WHERE programming_assignment_id = ? AND code = ?
    let by_assignment = Index::create()
        .if_not_exists()
        .name("idx_submission_assignment")
        .table(submission::Entity)
        .col(submission::Column::ProgrammingAssignmentId)
        .to_owned();

    for (name, stmt) in [
        ("idx_submission_user_correct", user_correct),
        ("idx_submission_assignment", by_assignment),
    ] {
        match db.execute_raw(backend.build(&stmt)).await {
            Ok(_) => info!("Ensured index {name} exists"),
            Err(e) => warn!("Failed to create index {name}: {e}"),
        }
    }

    Ok(())
}
