//! Repository to SIG ownership, derived from the community repository tree.
//!
//! The community repository lays out ownership as
//! `sig/<group>/<org>/<shard>/<repo>.yaml`; every such file declares that
//! `<org>/<repo>` belongs to `<group>`.

use std::collections::{BTreeMap, HashMap};

const SEGMENT_COUNT: usize = 5;
const PATH_PREFIX: &str = "sig";
const PATH_SUFFIX: &str = ".yaml";

/// Read-only lookup built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMap {
    repos: HashMap<String, String>,
    groups: BTreeMap<String, Vec<String>>,
}

impl GroupMap {
    /// Build the map from a tree listing. Paths that do not follow the
    /// ownership layout are ignored.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for path in paths {
            if let Some((repo, group)) = parse_ownership_path(path.as_ref()) {
                map.groups
                    .entry(group.clone())
                    .or_default()
                    .push(repo.clone());
                map.repos.insert(repo, group);
            }
        }
        map
    }

    /// Owning group of `repo`, or `""` when unknown.
    pub fn group_of(&self, repo: &str) -> &str {
        self.repos.get(repo).map_or("", String::as_str)
    }

    /// Repositories owned by `group`, in tree order.
    pub fn repos_of(&self, group: &str) -> &[String] {
        self.groups.get(group).map_or(&[], Vec::as_slice)
    }

    /// All groups with their repositories, sorted by group name.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(g, r)| (g.as_str(), r.as_slice()))
    }

    pub fn repo_count(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

/// Extract `(org/repo, group)` from an ownership path.
pub fn parse_ownership_path(path: &str) -> Option<(String, String)> {
    if !path.starts_with(PATH_PREFIX) || !path.ends_with(PATH_SUFFIX) {
        return None;
    }
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() != SEGMENT_COUNT {
        return None;
    }
    let leaf = segments[4].strip_suffix(PATH_SUFFIX)?;
    Some((format!("{}/{}", segments[2], leaf), segments[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_qualifying_path() {
        assert_eq!(
            parse_ownership_path("sig/Group-A/x/y/repo-name.yaml"),
            Some(("x/repo-name".to_string(), "Group-A".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert_eq!(parse_ownership_path("sig/Group-A/x/repo-name.yaml"), None);
        assert_eq!(parse_ownership_path("sig/Group-A/x/y/z/repo.yaml"), None);
        assert_eq!(parse_ownership_path("docs/Group-A/x/y/repo.yaml"), None);
        assert_eq!(parse_ownership_path("sig/Group-A/x/y/repo.yml"), None);
        assert_eq!(parse_ownership_path("sig/Group-A/x/y/OWNERS"), None);
        assert_eq!(parse_ownership_path(""), None);
    }

    #[test]
    fn test_group_map_lookups() {
        let map = GroupMap::from_paths([
            "sig/Kernel/src-openeuler/k/kernel.yaml",
            "sig/Kernel/openeuler/k/kernel.yaml",
            "sig/Compiler/src-openeuler/g/gcc.yaml",
            "sig/Kernel/sig-info.yaml",
            "README.md",
        ]);

        assert_eq!(map.repo_count(), 3);
        assert_eq!(map.group_of("src-openeuler/gcc"), "Compiler");
        assert_eq!(map.group_of("openeuler/kernel"), "Kernel");
        assert_eq!(map.group_of("openeuler/unknown"), "");
        assert_eq!(
            map.repos_of("Kernel"),
            ["src-openeuler/kernel".to_string(), "openeuler/kernel".to_string()]
        );
        assert!(map.repos_of("Nobody").is_empty());

        let groups: Vec<&str> = map.groups().map(|(g, _)| g).collect();
        assert_eq!(groups, vec!["Compiler", "Kernel"]);
    }

    #[test]
    fn test_empty_listing() {
        let map = GroupMap::from_paths(Vec::<String>::new());
        assert!(map.is_empty());
        assert_eq!(map.group_of("openeuler/kernel"), "");
    }

    proptest! {
        #[test]
        fn prop_qualifying_paths_yield_implied_pair(
            group in "[A-Za-z0-9_-]{1,12}",
            org in "[a-z0-9-]{1,12}",
            shard in "[a-z0-9]{1,3}",
            repo in "[A-Za-z0-9_.-]{1,16}",
        ) {
            let path = format!("sig/{group}/{org}/{shard}/{repo}.yaml");
            let map = GroupMap::from_paths([path]);
            let key = format!("{org}/{repo}");
            prop_assert_eq!(map.group_of(&key), group.as_str());
            prop_assert_eq!(map.repo_count(), 1);
        }

        #[test]
        fn prop_wrong_segment_count_is_ignored(
            segments in proptest::collection::vec("[a-z]{1,6}", 1..8usize),
        ) {
            prop_assume!(segments.len() + 1 != SEGMENT_COUNT);
            let path = format!("sig/{}.yaml", segments.join("/"));
            prop_assert!(GroupMap::from_paths([path]).is_empty());
        }
    }
}
