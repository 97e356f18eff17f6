//! Issue and pull request records as delivered by the remote API, plus the
//! rows persisted for them.

use serde::{Deserialize, Deserializer, Serialize};

/// Which of the two record kinds a run reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Issues,
    Pulls,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::Pulls => "pulls",
        }
    }

    /// Base name of the CSV report produced for this kind.
    pub fn report_basename(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDetail {
    pub title: String,
}

/// An open issue from the enterprise issue listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub html_url: String,
    pub title: String,
    /// Absent for issues filed outside any repository; such issues are skipped.
    #[serde(default)]
    pub repository: Option<RepositoryRef>,
    pub user: Author,
    #[serde(deserialize_with = "number_as_string")]
    pub number: String,
    pub issue_type: String,
    pub issue_state_detail: StateDetail,
    pub created_at: String,
    #[serde(default)]
    pub labels: Option<Vec<Label>>,
}

impl Issue {
    pub fn label_names(&self) -> Vec<String> {
        label_names(self.labels.as_deref())
    }

    pub fn organization(&self) -> Option<&str> {
        url_segment(&self.html_url, 3)
    }
}

/// An open pull request from the enterprise pull request listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub html_url: String,
    #[serde(default)]
    pub title: Option<String>,
    pub user: Author,
    #[serde(deserialize_with = "number_as_string")]
    pub number: String,
    #[serde(default)]
    pub draft: bool,
    /// `None` when the platform has not computed mergeability yet.
    #[serde(default)]
    pub mergeable: Option<bool>,
    pub created_at: String,
    #[serde(default)]
    pub labels: Option<Vec<Label>>,
}

impl PullRequest {
    pub fn label_names(&self) -> Vec<String> {
        label_names(self.labels.as_deref())
    }

    pub fn organization(&self) -> Option<&str> {
        url_segment(&self.html_url, 3)
    }

    /// `<org>/<repo>` taken from the pull request URL.
    pub fn repository(&self) -> Option<String> {
        let org = url_segment(&self.html_url, 3)?;
        let repo = url_segment(&self.html_url, 4)?;
        Some(format!("{org}/{repo}"))
    }
}

/// Persisted form of an issue. Derived fields are never stored here.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct IssueRow {
    pub sig: String,
    pub repo: String,
    pub link: String,
    pub number: String,
    #[sqlx(rename = "issueType")]
    pub issue_type: String,
    #[sqlx(rename = "issueState")]
    pub issue_state: String,
    pub author: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: String,
}

/// Persisted form of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PullRow {
    pub sig: String,
    pub link: String,
    pub status: String,
    pub author: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: String,
}

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

fn label_names(labels: Option<&[Label]>) -> Vec<String> {
    labels
        .unwrap_or_default()
        .iter()
        .map(|l| l.name.clone())
        .collect()
}

/// Segment `index` of `url` split on `/`. For `https://gitee.com/org/repo/...`
/// index 3 is the organization and index 4 the repository.
pub fn url_segment(url: &str, index: usize) -> Option<&str> {
    url.split('/').nth(index).filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Text(String),
    Int(u64),
}

fn number_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Text(s) => s,
        NumberRepr::Int(n) => n.to_string(),
    })
}
