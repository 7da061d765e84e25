use anyhow::Context;
use common::database::init_db;
use common::seed::{load_seed_file, seed_assignments};
use common::shutdown::install_shutdown_handler;
use programming_api::config::AppConfig;
use programming_api::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    if let Some(path) = &config.assignments.seed_file {
        let seeds = load_seed_file(path)?;
        seed_assignments(&db, &seeds)
            .await
            .context("Failed to seed assignments")?;
    }

    let state = AppState {
        db,
        config: config.clone(),
    };
    let app = programming_api::build_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Programming API running at http://{}", listener.local_addr()?);

    let shutdown = install_shutdown_handler()?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
