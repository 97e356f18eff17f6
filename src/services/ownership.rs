//! Repository ownership resolution.

use tracing::{info, instrument, warn};

use crate::domain::models::GroupMap;
use crate::domain::ports::RemoteSource;

/// Fetch the community tree and build the ownership map.
///
/// Ownership is best-effort: when the tree cannot be fetched the failure is
/// logged and an empty map is returned, so every record resolves to `""`.
#[instrument(skip_all)]
pub async fn resolve_groups(source: &dyn RemoteSource) -> GroupMap {
    info!("resolving repository ownership");
    match source.fetch_tree_paths().await {
        Ok(paths) => {
            let map = GroupMap::from_paths(&paths);
            info!(
                paths = paths.len(),
                repos = map.repo_count(),
                "repository ownership resolved"
            );
            map
        }
        Err(err) => {
            warn!(error = %err, "failed to fetch community tree; owning groups will be empty");
            GroupMap::default()
        }
    }
}
