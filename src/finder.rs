//! File finder for discovering manifest files below a repository root.
//!
//! The `FileFinder` walks a root directory, prunes excluded subtrees, keeps
//! the files accepted by the include filter, and reports how much of the tree
//! it looked at. Sibling subtrees of the root are walked in parallel, but the
//! result is always the name-sorted depth-first order of a sequential walk.
//!
//! # Exclusion defaults
//!
//! When no exclude patterns are given, [`DEFAULT_EXCLUDE_PATTERNS`]
//! (`node_modules`) applies. Supplying any exclude pattern *replaces* the
//! default list; add `node_modules` back explicitly to keep it pruned.
//!
//! # Worker threads
//!
//! Subtrees are read on a lazily built process-wide pool of `manifest-scan-N`
//! threads. [`FindOptions::threads()`] asks for a dedicated pool of that size
//! for one call instead.

use crate::error::FindError;
use crate::matcher::{Candidate, PatternSet};
use crate::paths::{to_manifest_path, to_posix};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Exclusions applied when the caller supplies none
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["node_modules"];

/// Upper bound on shared pool threads
const DEFAULT_MAX_THREADS: usize = 8;

/// Pool shared by every call that does not ask for its own
static SCAN_POOL: OnceCell<ThreadPool> = OnceCell::new();

/// Options controlling a single traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Patterns pruning files and whole directories; empty means the defaults
    pub exclude_patterns: Vec<String>,
    /// If non-empty, only files matching one of these are kept
    pub include_patterns: Vec<String>,
    /// Levels below the root to descend; `Some(0)` lists the root only
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Worker threads for this call; `0` uses the shared pool
    pub threads: usize,
}

impl FindOptions {
    /// Options with no filters and unbounded depth
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the exclude patterns (and with them the defaults)
    #[must_use]
    pub fn exclude<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.exclude_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the include patterns
    #[must_use]
    pub fn include<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.include_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Bound the traversal depth
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Follow symbolic links while walking
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Read subtrees on a dedicated pool of `threads` workers
    #[must_use]
    pub const fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Exclude patterns actually in force for this traversal
    #[must_use]
    pub fn effective_excludes(&self) -> Vec<String> {
        if self.exclude_patterns.is_empty() {
            DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| (*p).to_string()).collect()
        } else {
            self.exclude_patterns.clone()
        }
    }
}

/// Outcome of a successful traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalResult {
    /// Absolute paths of kept files, unique, in traversal order
    pub files: Vec<PathBuf>,
    /// Directories reached and not pruned, the root included
    pub scanned_dirs: usize,
    /// Regular files reached and not excluded, whether or not they were kept
    pub scanned_files: usize,
}

/// Partial result for one child of the root
#[derive(Debug, Default)]
struct SubtreeScan {
    /// Kept files in walk order
    files: Vec<PathBuf>,
    /// Directories reached below the child, the child included
    dirs: usize,
    /// Regular files that survived exclusion
    scanned_files: usize,
}

/// Walker applying exclusion and inclusion rules below a root
#[derive(Debug)]
pub struct FileFinder {
    /// Patterns pruning entries
    exclude: PatternSet,
    /// Patterns a file must match to be kept, if any
    include: PatternSet,
    /// Levels below the root to descend
    max_depth: Option<usize>,
    /// Whether to follow symbolic links
    follow_symlinks: bool,
    /// Size of a dedicated pool; `0` uses the shared one
    threads: usize,
}

impl FileFinder {
    /// Compile the patterns in `options` into a finder
    ///
    /// # Errors
    ///
    /// Returns `FindError::InvalidArgument` if any pattern is malformed
    pub fn new(options: &FindOptions) -> Result<Self, FindError> {
        let exclude = PatternSet::glob(&options.effective_excludes())?;
        let include = PatternSet::glob(&options.include_patterns)?;
        let finder = Self::with_pattern_sets(
            exclude,
            include,
            options.max_depth,
            options.follow_symlinks,
        );
        Ok(finder.with_threads(options.threads))
    }

    /// Build a finder from already compiled pattern sets of any dialect
    ///
    /// No defaults are added here: an empty `exclude` set prunes nothing.
    #[must_use]
    pub const fn with_pattern_sets(
        exclude: PatternSet,
        include: PatternSet,
        max_depth: Option<usize>,
        follow_symlinks: bool,
    ) -> Self {
        Self {
            exclude,
            include,
            max_depth,
            follow_symlinks,
            threads: 0,
        }
    }

    /// Use a dedicated pool of `threads` workers; `0` uses the shared one
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Walk `root` and collect every kept file
    ///
    /// # Errors
    ///
    /// Returns `FindError::FileSystem` naming `root` if it is empty, missing,
    /// not a readable directory, or if any read fails during the walk
    pub fn find(&self, root: &Path) -> Result<TraversalResult, FindError> {
        let span = span!(Level::DEBUG, "find_files", root = %root.display());
        let _guard = span.enter();

        if root.as_os_str().is_empty() {
            return Err(FindError::file_system(
                root,
                io::Error::new(io::ErrorKind::InvalidInput, "root path is empty"),
            ));
        }

        let base = std::path::absolute(root).map_err(|e| FindError::file_system(root, e))?;
        let children = read_sorted_children(&base).map_err(|e| FindError::file_system(root, e))?;

        let scan_children = || {
            children
                .par_iter()
                .map(|child| self.scan_subtree(root, &base, child))
                .collect::<Result<Vec<SubtreeScan>, FindError>>()
        };
        let dedicated = self.dedicated_pool();
        let subtrees = match dedicated.as_ref().or_else(|| shared_pool()) {
            Some(pool) => pool.install(scan_children),
            None => scan_children(),
        }?;

        let mut result = TraversalResult {
            scanned_dirs: 1,
            ..TraversalResult::default()
        };
        let mut seen = HashSet::new();
        for subtree in subtrees {
            result.scanned_dirs += subtree.dirs;
            result.scanned_files += subtree.scanned_files;
            for file in subtree.files {
                if seen.insert(file.clone()) {
                    result.files.push(file);
                }
            }
        }

        debug!(
            files = result.files.len(),
            scanned_dirs = result.scanned_dirs,
            scanned_files = result.scanned_files,
            "Traversal complete"
        );

        Ok(result)
    }

    /// Walk one child of the root, which sits at depth 0
    fn scan_subtree(
        &self,
        root: &Path,
        base: &Path,
        child: &Path,
    ) -> Result<SubtreeScan, FindError> {
        let mut walker = WalkDir::new(child)
            .follow_links(self.follow_symlinks)
            .follow_root_links(self.follow_symlinks)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut scan = SubtreeScan::default();
        for entry in walker
            .into_iter()
            .filter_entry(|e| !self.is_excluded(base, e))
        {
            let entry = entry.map_err(|e| FindError::file_system(root, e.into()))?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                scan.dirs += 1;
            } else if file_type.is_file() {
                scan.scanned_files += 1;
                if self.is_included(base, entry.path()) {
                    scan.files.push(entry.into_path());
                }
            }
        }

        Ok(scan)
    }

    /// Build the per-call pool, if one was asked for
    fn dedicated_pool(&self) -> Option<ThreadPool> {
        if self.threads == 0 {
            return None;
        }
        build_pool(self.threads)
            .map_err(|e| warn!(threads = self.threads, error = %e, "Using shared scan pool"))
            .ok()
    }

    /// Check an entry against the exclude patterns
    fn is_excluded(&self, base: &Path, entry: &DirEntry) -> bool {
        let excluded = with_candidate(base, entry.path(), |c| self.exclude.is_match(c));
        if excluded {
            trace!(path = %entry.path().display(), "Pruned by exclude pattern");
        }
        excluded
    }

    /// Check a file against the include patterns; no patterns keeps everything
    fn is_included(&self, base: &Path, path: &Path) -> bool {
        self.include.is_empty() || with_candidate(base, path, |c| self.include.is_match(c))
    }
}

/// Find files under `root` using `options`
///
/// # Errors
///
/// See [`FileFinder::new`] and [`FileFinder::find`]
pub fn find(root: impl AsRef<Path>, options: &FindOptions) -> Result<TraversalResult, FindError> {
    FileFinder::new(options)?.find(root.as_ref())
}

/// The process-wide scan pool, built on first use
///
/// Returns `None` if the pool cannot be built; the caller then runs on the
/// current thread.
fn shared_pool() -> Option<&'static ThreadPool> {
    SCAN_POOL
        .get_or_try_init(|| build_pool(default_threads()))
        .map_err(|e| warn!(error = %e, "Scan pool unavailable"))
        .ok()
}

/// A pool of `threads` workers named `manifest-scan-N`
fn build_pool(threads: usize) -> Result<ThreadPool, rayon::ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("manifest-scan-{i}"))
        .build()
}

/// Shared pool size: one thread per core, at most [`DEFAULT_MAX_THREADS`]
fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .min(DEFAULT_MAX_THREADS)
}

/// Build the matcher view of `path` and evaluate `f` on it
fn with_candidate(base: &Path, path: &Path, f: impl FnOnce(&Candidate<'_>) -> bool) -> bool {
    let relative = to_manifest_path(base, path).unwrap_or_default();
    let absolute = to_posix(path);
    f(&Candidate::new(&relative, &absolute))
}

/// List the direct children of `dir` sorted by file name
fn read_sorted_children(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries.into_iter().map(|e| e.path()).collect())
}
