//! End-to-end planning: discover manifests, normalize them, reconcile.

use crate::config::Config;
use crate::error::FindError;
use crate::finder::find;
use crate::paths::to_manifest_path;
use crate::reconcile::{ReconciliationResult, RemoteProject, reconcile};
use crate::supported::manifest_patterns;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{Level, info, span};

/// Everything a caller needs to act on one repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    /// Repo-relative manifest paths found on disk, sorted
    pub manifests: Vec<String>,
    /// Directories the finder walked
    pub scanned_dirs: usize,
    /// Files the finder looked at
    pub scanned_files: usize,
    /// What to import and what to deactivate
    pub actions: ReconciliationResult,
}

/// Scan `root` and diff its manifests against `remote_projects`
///
/// When `config.scan.include_patterns` is empty the include filter is derived
/// from `config.reconcile.manifest_types`, so only files of managed types are
/// considered.
///
/// # Errors
///
/// Returns the finder's error if the scan fails
pub fn plan_sync(
    root: &Path,
    remote_projects: &[RemoteProject],
    config: &Config,
) -> Result<SyncPlan, FindError> {
    let span = span!(Level::INFO, "plan_sync", root = %root.display());
    let _guard = span.enter();

    let mut options = config.find_options();
    if options.include_patterns.is_empty() {
        options.include_patterns = manifest_patterns(&config.reconcile.manifest_types);
    }

    let traversal = find(root, &options)?;
    let base = std::path::absolute(root).map_err(|e| FindError::file_system(root, e))?;

    let mut manifests: Vec<String> = traversal
        .files
        .iter()
        .filter_map(|file| to_manifest_path(&base, file))
        .collect();
    manifests.sort();

    let actions = reconcile(
        &manifests,
        remote_projects,
        &config.reconcile.recognized_types(),
    );

    info!(
        manifests = manifests.len(),
        import = actions.import.len(),
        deactivate = actions.deactivate.len(),
        "Sync plan ready"
    );

    Ok(SyncPlan {
        manifests,
        scanned_dirs: traversal.scanned_dirs,
        scanned_files: traversal.scanned_files,
        actions,
    })
}
