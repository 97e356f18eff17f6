//! sigstats - SIG issue and pull request statistics for Gitee enterprises
//!
//! sigstats lists the open issues or pull requests of a Gitee enterprise,
//! attributes each one to the SIG owning its repository, derives a review
//! status and an age, upserts the result into a record store and writes a
//! dated CSV report.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): records, configuration and the port traits
//! - **Service Layer** (`services`): the reconciliation pipeline
//! - **Adapters** (`adapters`): Gitee client, SQLite/MySQL stores, CSV reports
//! - **Infrastructure Layer** (`infrastructure`): configuration loading and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use sigstats::adapters::{open_record_store, GiteeClient};
//! use sigstats::domain::models::{Config, RecordKind};
//! use sigstats::services::Reconciler;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let store = open_record_store(&config.database).await?;
//!     let client = GiteeClient::new(&config.remote, "token")?;
//!     let outcome = Reconciler::new(&config.remote, &client, store.as_ref())
//!         .run(RecordKind::Pulls)
//!         .await?;
//!     println!("{} rows", outcome.table.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, DatabaseConfig, GroupMap, Issue, LoggingConfig, PullRequest, RecordKind, RemoteConfig,
    ReportConfig, ReportTable,
};
pub use domain::ports::{FetchError, RecordStore, RemoteSource, ReportSink};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Reconciler, RunOutcome, RunSummary, StatusClassifier, StatusVocabulary};
