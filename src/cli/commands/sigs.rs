//! `sigstats sigs`: show which repositories each group owns.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use comfy_table::Cell;

use crate::adapters::GiteeClient;
use crate::cli::display::{count_cell, list_table, render_list};
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SigsArgs;
use crate::domain::models::GroupMap;
use crate::domain::ports::RemoteSource;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};

/// Repositories shown per group in the human listing.
const MAX_LISTED_REPOS: usize = 5;

#[derive(Debug, serde::Serialize)]
pub struct SigsOutput {
    pub groups: BTreeMap<String, Vec<String>>,
}

impl SigsOutput {
    /// Collect the groups of `map`, optionally narrowed to one group.
    pub fn from_map(map: &GroupMap, only: Option<&str>) -> Self {
        let groups = map
            .groups()
            .filter(|(group, _)| only.is_none_or(|g| g == *group))
            .map(|(group, repos)| (group.to_string(), repos.to_vec()))
            .collect();
        Self { groups }
    }
}

impl CommandOutput for SigsOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["group", "repos", "repositories"]);
        for (group, repos) in &self.groups {
            let mut listed = repos
                .iter()
                .take(MAX_LISTED_REPOS)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            if repos.len() > MAX_LISTED_REPOS {
                listed.push_str(&format!(", … (+{})", repos.len() - MAX_LISTED_REPOS));
            }
            table.add_row(vec![Cell::new(group), count_cell(repos.len()), Cell::new(listed)]);
        }
        render_list("group", &table, self.groups.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SigsArgs, json_mode: bool) -> Result<()> {
    let mut config = ConfigLoader::load(args.config.as_deref())?;
    if let Some(token) = args.token {
        config.remote.token = Some(token);
    }

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let client = GiteeClient::new(&config.remote, config.remote.token.clone().unwrap_or_default())
        .context("Failed to create Gitee client")?;
    let map = load_group_map(&client).await?;

    output(&SigsOutput::from_map(&map, args.group.as_deref()), json_mode);
    Ok(())
}

/// Fetch the community tree and build the ownership map.
///
/// Unlike a reconciliation run, a failed fetch here is an error.
pub async fn load_group_map(source: &dyn RemoteSource) -> Result<GroupMap> {
    let paths = source
        .fetch_tree_paths()
        .await
        .context("Failed to fetch community tree")?;
    Ok(GroupMap::from_paths(&paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> GroupMap {
        GroupMap::from_paths([
            "sig/Kernel/openeuler/k/kernel.yaml",
            "sig/Kernel/src-openeuler/k/kernel.yaml",
            "sig/Compiler/openeuler/g/gcc.yaml",
        ])
    }

    #[test]
    fn test_from_map_lists_all_groups() {
        let out = SigsOutput::from_map(&map(), None);
        assert_eq!(out.groups.len(), 2);
        assert_eq!(
            out.groups["Kernel"],
            vec!["openeuler/kernel".to_string(), "src-openeuler/kernel".to_string()]
        );
    }

    #[test]
    fn test_group_filter() {
        let out = SigsOutput::from_map(&map(), Some("Compiler"));
        assert_eq!(out.groups.len(), 1);
        assert!(out.to_human().contains("openeuler/gcc"));

        let out = SigsOutput::from_map(&map(), Some("Nope"));
        assert_eq!(out.to_human(), "No groups found.");
    }

    #[test]
    fn test_long_repo_lists_are_elided() {
        let paths: Vec<String> = (0..8)
            .map(|i| format!("sig/Big/openeuler/r/repo{i}.yaml"))
            .collect();
        let out = SigsOutput::from_map(&GroupMap::from_paths(&paths), None);
        assert!(out.to_human().contains("(+3)"));
        assert_eq!(out.to_json()["groups"]["Big"].as_array().unwrap().len(), 8);
    }
}
