pub mod config;
pub mod group_map;
pub mod record;
pub mod report;

pub use config::{Config, DatabaseConfig, LoggingConfig, RemoteConfig, ReportConfig};
pub use group_map::GroupMap;
pub use record::{
    Author, Issue, IssueRow, Label, PullRequest, PullRow, RecordKind, RepositoryRef, StateDetail,
    UpsertOutcome,
};
pub use report::{ReportTable, ISSUE_REPORT_HEADER, PULL_REPORT_HEADER};
