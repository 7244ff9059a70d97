#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # Manifest Sync - Manifest Discovery & Reconciliation
//!
//! Finds dependency manifests (`pom.xml`, `package.json`, ...) in a
//! repository tree and works out how a remote list of monitored projects has
//! to change to match them.
//!
//! ## Architecture
//!
//! - [`finder`]: bounded, parallel directory walk with glob exclusion and inclusion
//! - [`matcher`]: the glob dialect used by the finder, behind a small trait
//! - [`reconcile`]: pure set reconciliation of manifests against remote projects
//! - [`supported`]: manifest types recognized by default and their file names
//! - [`sync`]: find, normalize to repo-relative paths, reconcile
//! - [`config`]: TOML configuration and its validation
//!
//! ## Example Usage
//!
//! ```no_run
//! use manifest_sync::{FindOptions, RemoteProject, find, reconcile_supported};
//! use manifest_sync::paths::to_manifest_path;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let root = Path::new("/work/repo");
//! let found = find(root, &FindOptions::new().include(["pom.xml"]).max_depth(6))?;
//!
//! let manifests: Vec<String> = found
//!     .files
//!     .iter()
//!     .filter_map(|f| to_manifest_path(root, f))
//!     .collect();
//!
//! let remote = vec![RemoteProject::new("org/repo:legacy/pom.xml", "maven")];
//! let actions = reconcile_supported(&manifests, &remote);
//! println!("import {:?}, deactivate {:?}", actions.import, actions.deactivate);
//! # Ok(())
//! # }
//! ```

/// Configuration loading, saving and validation.
pub mod config;

/// Error types for manifest discovery.
pub mod error;

/// Directory traversal with exclusion and inclusion filters.
pub mod finder;

/// Glob pattern matching abstraction.
pub mod matcher;

/// Repo-relative path normalization.
pub mod paths;

/// Reconciliation of discovered manifests against remote projects.
pub mod reconcile;

/// Supported manifest types.
pub mod supported;

/// Scan-and-reconcile pipeline.
pub mod sync;

pub use config::Config;
pub use error::FindError;
pub use finder::{DEFAULT_EXCLUDE_PATTERNS, FileFinder, FindOptions, TraversalResult, find};
pub use matcher::{Candidate, GlobPattern, PatternMatcher, PatternSet};
pub use reconcile::{ProjectKey, ReconciliationResult, RemoteProject, reconcile, reconcile_supported};
pub use sync::{SyncPlan, plan_sync};

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
