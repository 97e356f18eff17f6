//! Record store port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{IssueRow, PullRow, UpsertOutcome};

/// Persistence of issue and pull rows keyed by their link.
///
/// An upsert inserts the full row on first sighting and otherwise only
/// refreshes the mutable columns (`sig`, `issueType`, `issueState` for issues;
/// `sig`, `status` for pulls). Rows are never deleted.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or update an issue row by link.
    async fn upsert_issue(&self, row: &IssueRow) -> DomainResult<UpsertOutcome>;

    /// Insert or update a pull row by link.
    async fn upsert_pull(&self, row: &PullRow) -> DomainResult<UpsertOutcome>;

    /// Get an issue row by link.
    async fn find_issue(&self, link: &str) -> DomainResult<Option<IssueRow>>;

    /// Get a pull row by link.
    async fn find_pull(&self, link: &str) -> DomainResult<Option<PullRow>>;

    /// Number of stored issue rows.
    async fn count_issues(&self) -> DomainResult<u64>;

    /// Number of stored pull rows.
    async fn count_pulls(&self) -> DomainResult<u64>;
}
