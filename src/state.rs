use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sqlx::postgres::PgPool;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    /// Apply pending migrations, then open the SeaORM connection pool
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        run_migrations(&config.database_url).await?;

        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(20)
            .min_connections(2)
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        Ok(Self { db, config })
    }
}

/// Schema lives in `migrations/`; the SQLx pool is only held while they run
async fn run_migrations(database_url: &str) -> Result<(), AppStateError> {
    let pool = PgPool::connect(database_url)
        .await
        .map_err(|e| AppStateError::Postgres(e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppStateError::Migration(e.to_string()))?;

    pool.close().await;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
