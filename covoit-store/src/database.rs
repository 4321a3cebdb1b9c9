use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;
use covoit_core::RepositoryError;

use crate::app_config::DatabaseConfig;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    /// Creates the tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Waits for checked-out connections to be returned, then closes them.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed.");
    }
}

/// Wraps a driver error with what the repository was trying to do.
/// Unique-index violations are reported as [`RepositoryError::Duplicate`],
/// check-constraint violations as [`RepositoryError::Constraint`].
pub(crate) fn storage_error(context: impl Into<String>, err: sqlx::Error) -> RepositoryError {
    let context = context.into();
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Duplicate(format!("{}: {}", context, db_err.message()));
        }
        if db_err.is_check_violation() {
            return RepositoryError::Constraint(format!("{}: {}", context, db_err.message()));
        }
    }
    RepositoryError::storage(context, err)
}
