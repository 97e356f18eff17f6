//! Gitee HTTP client.
//!
//! Wraps the Gitee v5 REST API with typed methods for the three reads the
//! pipeline needs. Requests carry the access token as a query parameter;
//! errors are stripped of their URL so the token never reaches the logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::domain::models::{Issue, PullRequest, RemoteConfig};
use crate::domain::ports::{FetchError, FetchResult, RemoteSource};
use crate::infrastructure::logging::SecretScrubber;

use super::models::GiteeTree;

/// Raw body the API returns once a listing is exhausted.
const END_OF_STREAM: &str = "[]";

/// Longest error body kept in a [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for the Gitee v5 API.
#[derive(Debug, Clone)]
pub struct GiteeClient {
    /// The underlying HTTP client.
    http: Client,
    base_url: String,
    token: String,
    enterprise: String,
    community_owner: String,
    community_repo: String,
    community_ref: String,
    per_page: u32,
    scrubber: SecretScrubber,
}

impl GiteeClient {
    /// Create a client for the endpoints named in `remote`. An empty token
    /// sends anonymous requests.
    pub fn new(remote: &RemoteConfig, token: impl Into<String>) -> FetchResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(remote.timeout_secs))
            .user_agent(concat!("sigstats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        let token = token.into();
        Ok(Self {
            http,
            base_url: remote.base_url.trim_end_matches('/').to_string(),
            scrubber: SecretScrubber::new().with_secrets([token.clone()]),
            token,
            enterprise: remote.enterprise.clone(),
            community_owner: remote.community_owner.clone(),
            community_repo: remote.community_repo.clone(),
            community_ref: remote.community_ref.clone(),
            per_page: remote.per_page,
        })
    }

    /// GET `path` and return the body of a successful response.
    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> FetchResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?query, "GET");

        let mut request = self.http.get(&url);
        if !self.token.is_empty() {
            request = request.query(&[("access_token", self.token.as_str())]);
        }
        let resp = request.query(query).send().await.map_err(transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: self.scrubber.scrub_message(&body),
            });
        }
        Ok(body)
    }

    fn listing_query(&self, direction: &str, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("state", "open".to_string()),
            ("sort", "created".to_string()),
            ("direction", direction.to_string()),
            ("page", page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

#[async_trait]
impl RemoteSource for GiteeClient {
    #[instrument(skip(self))]
    async fn fetch_tree_paths(&self) -> FetchResult<Vec<String>> {
        let path = format!(
            "/repos/{}/{}/git/trees/{}",
            self.community_owner, self.community_repo, self.community_ref
        );
        let body = self.get_text(&path, &[("recursive", "1".to_string())]).await?;
        let tree: GiteeTree = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            what: "community tree".to_string(),
            source,
        })?;
        if tree.truncated == Some(true) {
            warn!(
                entries = tree.tree.len(),
                "community tree listing was truncated; some repositories will have no group"
            );
        }
        Ok(tree.tree.into_iter().map(|entry| entry.path).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_issue_page(&self, page: u32) -> FetchResult<Option<Vec<Issue>>> {
        let path = format!("/enterprises/{}/issues", self.enterprise);
        let body = self.get_text(&path, &self.listing_query("asc", page)).await?;
        decode_page(&body, "issue page")
    }

    #[instrument(skip(self))]
    async fn fetch_pull_page(&self, page: u32) -> FetchResult<Option<Vec<PullRequest>>> {
        let path = format!("/enterprise/{}/pull_requests", self.enterprise);
        let body = self.get_text(&path, &self.listing_query("desc", page)).await?;
        decode_page(&body, "pull request page")
    }
}

/// Decode one listing page; `None` marks the end of the listing.
fn decode_page<T: DeserializeOwned>(body: &str, what: &str) -> FetchResult<Option<Vec<T>>> {
    if body == END_OF_STREAM {
        return Ok(None);
    }
    let records: Vec<T> = serde_json::from_str(body).map_err(|source| FetchError::Decode {
        what: what.to_string(),
        source,
    })?;
    Ok(if records.is_empty() { None } else { Some(records) })
}

fn transport(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.without_url().to_string())
}
