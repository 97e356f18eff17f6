use serde::{Deserialize, Serialize};

/// Main configuration structure for sigstats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Record store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report output configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteConfig {
    /// Base URL of the Gitee v5 API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access token; required for `run`
    #[serde(default)]
    pub token: Option<String>,

    /// Enterprise whose issues and pull requests are listed
    #[serde(default = "default_enterprise")]
    pub enterprise: String,

    /// Owner of the community metadata repository
    #[serde(default = "default_community_owner")]
    pub community_owner: String,

    /// Name of the community metadata repository
    #[serde(default = "default_community_repo")]
    pub community_repo: String,

    /// Ref whose tree is listed
    #[serde(default = "default_community_ref")]
    pub community_ref: String,

    /// Organizations whose records are reconciled; everything else is skipped
    #[serde(default = "default_allowed_orgs")]
    pub allowed_orgs: Vec<String>,

    /// Records requested per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://gitee.com/api/v5".to_string()
}

fn default_enterprise() -> String {
    "open_euler".to_string()
}

fn default_community_owner() -> String {
    "openeuler".to_string()
}

fn default_community_repo() -> String {
    "community".to_string()
}

fn default_community_ref() -> String {
    "master".to_string()
}

fn default_allowed_orgs() -> Vec<String> {
    vec!["src-openeuler".to_string(), "openeuler".to_string()]
}

const fn default_per_page() -> u32 {
    100
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            enterprise: default_enterprise(),
            community_owner: default_community_owner(),
            community_repo: default_community_repo(),
            community_ref: default_community_ref(),
            allowed_orgs: default_allowed_orgs(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    pub fn is_allowed_org(&self, org: &str) -> bool {
        self.allowed_orgs.iter().any(|o| o == org)
    }
}

/// Record store configuration.
///
/// `url` wins when set (any `sqlite:` or `mysql://` URL); otherwise a MySQL
/// DSN is assembled from the individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub name: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

const fn default_port() -> u16 {
    3306
}

const fn default_max_connections() -> u32 {
    1
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: String::new(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            name: String::new(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// The `url` override, if one is set. Without it the store is the MySQL
    /// server named by the separate host, port, user, password and name.
    pub fn explicit_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Log file rotation: daily, hourly or never
    #[serde(default = "default_log_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_log_rotation(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportConfig {
    /// Directory the CSV reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}
