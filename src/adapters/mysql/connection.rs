//! MySQL connection pool management.

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::str::FromStr;

use crate::adapters::store::{ConnectionError, PoolConfig};
use crate::domain::models::DatabaseConfig;
use crate::infrastructure::logging::SecretScrubber;

/// Connect options for the configured server.
///
/// An explicit `url` is parsed as a `mysql://` URL. Otherwise the options are
/// built from the separate fields, so user and password are taken verbatim and
/// need no percent-encoding.
pub fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, ConnectionError> {
    let options = match config.explicit_url() {
        Some(url) => MySqlConnectOptions::from_str(url)
            .map_err(|_| ConnectionError::InvalidDatabaseUrl(SecretScrubber::new().scrub_url(url)))?,
        None => MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name),
    };
    Ok(options.charset("utf8mb4"))
}

pub async fn create_pool(
    connect_options: MySqlConnectOptions,
    config: Option<PoolConfig>,
) -> Result<MySqlPool, ConnectionError> {
    let config = config.unwrap_or_default();

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options)
        .await
        .map_err(ConnectionError::PoolCreationFailed)
}

pub async fn verify_connection(pool: &MySqlPool) -> Result<(), ConnectionError> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map_err(ConnectionError::ConnectionFailed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::ConnectOptions;

    fn fields(password: &str) -> DatabaseConfig {
        DatabaseConfig {
            host: "db.internal".to_string(),
            port: 3307,
            user: "stats".to_string(),
            password: password.to_string(),
            name: "gitee".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_options_from_fields_keep_reserved_characters() {
        let options = connect_options(&fields("pa/ss#1")).unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "stats");
        assert_eq!(options.get_database(), Some("gitee"));
        assert_eq!(options.get_charset(), "utf8mb4");

        let url = options.to_url_lossy();
        assert_eq!(url.password(), Some("pa%2Fss%231"));
        assert_eq!(url.host_str(), Some("db.internal"));
    }

    #[test]
    fn test_explicit_url_wins_over_fields() {
        let config = DatabaseConfig {
            url: Some("mysql://reader:pw@replica:3306/mirror".to_string()),
            ..fields("ignored")
        };
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "replica");
        assert_eq!(options.get_username(), "reader");
        assert_eq!(options.get_database(), Some("mirror"));
    }

    #[test]
    fn test_unparseable_url_error_hides_password() {
        let config = DatabaseConfig {
            url: Some("mysql://stats:pa/ss#1@db.internal:3306/gitee".to_string()),
            ..Default::default()
        };
        let err = connect_options(&config).unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidDatabaseUrl(_)));
        assert!(!err.to_string().contains("pa/ss#1"));
    }
}
