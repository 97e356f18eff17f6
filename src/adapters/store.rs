//! Record store selection and the errors shared by the SQL backends.

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::adapters::mysql::{self, MySqlRecordStore};
use crate::adapters::sqlite::{self, MigrationError, SqliteRecordStore};
use crate::domain::models::DatabaseConfig;
use crate::domain::ports::RecordStore;
use crate::infrastructure::logging::SecretScrubber;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Failed to create pool: {0}")]
    PoolCreationFailed(#[source] sqlx::Error),
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
    #[error("Failed to create directory: {0}")]
    DirectoryCreationFailed(#[source] std::io::Error),
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            ..Self::default()
        }
    }
}

/// Open the store named by `config`.
///
/// An explicit `url` picks the backend by scheme. Without one the store is the
/// MySQL server named by the separate host, port, user, password and name.
/// SQLite stores get their schema from the embedded migrations; MySQL stores
/// are expected to already carry the `issue` and `pull` tables.
pub async fn open_record_store(config: &DatabaseConfig) -> Result<Box<dyn RecordStore>, DatabaseError> {
    let pool_config = PoolConfig::from(config);
    let scrubber = SecretScrubber::new().with_secrets([config.password.clone()]);

    match config.explicit_url() {
        Some(url) if url.starts_with("sqlite:") => {
            info!(url = %scrubber.scrub_url(url), "opening record store");
            let pool = sqlite::initialize_database(url, Some(pool_config)).await?;
            Ok(Box::new(SqliteRecordStore::new(pool)))
        }
        Some(url) if url.starts_with("mysql:") => {
            info!(url = %scrubber.scrub_url(url), "opening record store");
            open_mysql(config, pool_config).await
        }
        Some(url) => Err(ConnectionError::InvalidDatabaseUrl(scrubber.scrub_url(url)).into()),
        None => {
            info!(
                host = %config.host,
                port = config.port,
                database = %config.name,
                user = %config.user,
                "opening record store"
            );
            open_mysql(config, pool_config).await
        }
    }
}

async fn open_mysql(config: &DatabaseConfig, pool_config: PoolConfig) -> Result<Box<dyn RecordStore>, DatabaseError> {
    let options = mysql::connect_options(config)?;
    let pool = mysql::create_pool(options, Some(pool_config)).await?;
    mysql::verify_connection(&pool).await?;
    Ok(Box::new(MySqlRecordStore::new(pool)))
}
