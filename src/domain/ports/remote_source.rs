//! Remote source port: the Git-hosting API the pipeline pulls records from.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::{Issue, PullRequest};

/// Errors raised while fetching from the remote API.
///
/// Every variant aborts the run that hit it; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or connection error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("Unexpected status {status} from {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Body did not decode into the expected record shape
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Paginated access to open issues and pull requests, plus the community
/// repository tree used to resolve ownership.
///
/// Page fetchers return `Ok(None)` once the listing is exhausted.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Every path in the community repository tree.
    async fn fetch_tree_paths(&self) -> FetchResult<Vec<String>>;

    /// One page of open issues, 1-based.
    async fn fetch_issue_page(&self, page: u32) -> FetchResult<Option<Vec<Issue>>>;

    /// One page of open pull requests, 1-based.
    async fn fetch_pull_page(&self, page: u32) -> FetchResult<Option<Vec<PullRequest>>>;
}
