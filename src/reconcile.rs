//! Reconciliation of discovered manifests against monitored projects.
//!
//! A remote project is named `<target-identifier>:<manifest-path>`. Its key is
//! the part after the first colon, compared byte for byte with the discovered
//! manifest paths, so both sides must use the same normalization (see
//! [`crate::paths::to_manifest_path`]). Nothing here touches the filesystem or
//! the network.

use crate::supported::default_recognized_types;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{Level, debug, span};

/// A monitored project registered on the remote system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteProject {
    /// Namespaced name, `<target-identifier>:<manifest-path>`
    pub name: String,
    /// Project type, e.g. `maven` or `npm`
    #[serde(rename = "type")]
    pub project_type: String,
}

impl RemoteProject {
    /// Create a project record
    #[must_use]
    pub fn new(name: impl Into<String>, project_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_type: project_type.into(),
        }
    }

    /// Parse the namespaced name
    #[must_use]
    pub fn key(&self) -> ProjectKey<'_> {
        ProjectKey::parse(&self.name)
    }
}

/// The two halves of a namespaced project name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectKey<'a> {
    /// Everything before the first colon (the whole name if there is none)
    pub target_id: &'a str,
    /// Everything after the first colon; `None` if the name has no colon
    pub manifest_path: Option<&'a str>,
}

impl<'a> ProjectKey<'a> {
    /// Split `name` on its first colon
    #[must_use]
    pub fn parse(name: &'a str) -> Self {
        match name.split_once(':') {
            Some((target_id, manifest_path)) => Self {
                target_id,
                manifest_path: Some(manifest_path),
            },
            None => Self {
                target_id: name,
                manifest_path: None,
            },
        }
    }
}

/// Actions needed to bring the remote side in line with the repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Manifest paths with no remote project, in input order, no duplicates
    pub import: Vec<String>,
    /// Remote projects of a recognized type whose manifest is gone, in input order
    pub deactivate: Vec<RemoteProject>,
}

impl ReconciliationResult {
    /// Returns true if nothing needs to change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.import.is_empty() && self.deactivate.is_empty()
    }
}

/// Compute which manifests to import and which projects to deactivate
///
/// - `import`: every manifest whose path is not the key of any remote project
/// - `deactivate`: every remote project whose key is not among the manifests
///   and whose type is in `recognized_types`; stale projects of other types
///   are left alone
///
/// A project name without a colon has no key, so it never matches a
/// manifest. Duplicate manifests yield a single import.
#[must_use]
pub fn reconcile<S: AsRef<str>>(
    repo_manifests: &[S],
    remote_projects: &[RemoteProject],
    recognized_types: &HashSet<String>,
) -> ReconciliationResult {
    let span = span!(
        Level::DEBUG,
        "reconcile",
        manifests = repo_manifests.len(),
        projects = remote_projects.len()
    );
    let _guard = span.enter();

    let monitored: HashSet<&str> = remote_projects
        .iter()
        .filter_map(|p| p.key().manifest_path)
        .collect();
    let local: HashSet<&str> = repo_manifests.iter().map(AsRef::as_ref).collect();

    let mut emitted = HashSet::new();
    let import: Vec<String> = repo_manifests
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| !monitored.contains(m) && emitted.insert(*m))
        .map(str::to_string)
        .collect();

    let deactivate: Vec<RemoteProject> = remote_projects
        .iter()
        .filter(|p| {
            let present = p.key().manifest_path.is_some_and(|path| local.contains(path));
            !present && recognized_types.contains(&p.project_type)
        })
        .cloned()
        .collect();

    debug!(
        import = import.len(),
        deactivate = deactivate.len(),
        "Reconciliation complete"
    );

    ReconciliationResult { import, deactivate }
}

/// [`reconcile`] with every supported manifest type recognized
#[must_use]
pub fn reconcile_supported<S: AsRef<str>>(
    repo_manifests: &[S],
    remote_projects: &[RemoteProject],
) -> ReconciliationResult {
    reconcile(repo_manifests, remote_projects, &default_recognized_types())
}
