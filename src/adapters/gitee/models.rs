//! Gitee API response models that stay inside the adapter.
//!
//! Issue and pull request payloads decode straight into the domain records;
//! only the tree listing needs its own shape.

use serde::{Deserialize, Serialize};

/// Response of `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiteeTree {
    pub tree: Vec<GiteeTreeEntry>,
    /// Set when the platform cut the listing short.
    #[serde(default)]
    pub truncated: Option<bool>,
}

/// One blob or subtree in a tree listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiteeTreeEntry {
    pub path: String,
}
