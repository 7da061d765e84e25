use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::queue::GradingQueue;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub queue: GradingQueue,
}
