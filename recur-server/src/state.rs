//! Application state

use std::sync::Arc;

use shared::error::AppError;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::DbService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// HS256 secret for tenant tokens
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Ok(Self::with_db(db, &config.jwt_secret))
    }

    pub fn with_db(db: DbService, jwt_secret: &str) -> Self {
        Self {
            pool: db.pool,
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}
