//! PostgreSQL storage adapter implementation

pub mod chunk;
pub mod config;
pub mod document;
pub mod migrations;

pub use config::{ConfigError, PoolConfig, PostgresConfig};
pub use migrations::{MigrationError, MigrationManager};

use docqa_core::error::{DocqaError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

/// PostgreSQL storage adapter backing both the document and chunk ports
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect using the given configuration
    pub async fn new(config: &PostgresConfig) -> Result<Self> {
        config.validate().map_err(|e| DocqaError::ConfigInvalid {
            key: "database_url".to_string(),
            reason: e.to_string(),
        })?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .connect(&config.database_url)
            .await
            .map_err(|e| DocqaError::Storage(format!("Failed to connect to database: {}", e)))?;

        let store = Self { pool };
        store.health_check().await?;

        tracing::info!(
            max_connections = config.pool.max_connections,
            "Connected to PostgreSQL"
        );

        Ok(store)
    }

    /// Connect and apply pending migrations when the configuration asks for it
    pub async fn with_migrations(config: PostgresConfig) -> Result<Self> {
        let store = Self::new(&config).await?;
        if config.run_migrations {
            store.run_migrations().await?;
        }
        Ok(store)
    }

    /// Run all pending migrations
    pub async fn run_migrations(&self) -> Result<()> {
        let manager = MigrationManager::new(self.pool.clone());
        manager
            .run_migrations()
            .await
            .map_err(|e| DocqaError::Storage(e.to_string()))?;

        let version = manager
            .current_version()
            .await
            .map_err(|e| DocqaError::Storage(e.to_string()))?;
        tracing::info!(?version, "Database schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Perform a health check on the database connection
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DocqaError::Storage(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
