/// Checks a configuration file for unknown keys and unusable values.
pub mod validator;

use crate::finder::FindOptions;
use crate::supported::supported_types;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default configuration file path relative to the user config directory
pub const DEFAULT_CONFIG_PATH: &str = "manifest-sync/config.toml";

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory walk settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Which remote projects are managed
    #[serde(default)]
    pub reconcile: ReconcileConfig,

    /// Worker thread settings
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// How the repository tree is walked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Empty means the built-in `node_modules` exclusion
    pub exclude_patterns: Vec<String>,
    /// Empty means "derive from the manifest types" when planning a sync
    pub include_patterns: Vec<String>,
    /// Levels below the root to descend; unset walks the whole tree
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
}

/// Reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Project types eligible for deactivation
    pub manifest_types: Vec<String>,
}

/// Parallelism settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Worker threads for parallel directory reads; 0 picks a default
    pub parallel_threads: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            manifest_types: supported_types().map(str::to_string).collect(),
        }
    }
}

impl ScanConfig {
    /// Finder options for this scan section, taken verbatim
    #[must_use]
    pub fn to_find_options(&self) -> FindOptions {
        FindOptions {
            exclude_patterns: self.exclude_patterns.clone(),
            include_patterns: self.include_patterns.clone(),
            max_depth: self.max_depth,
            follow_symlinks: self.follow_symlinks,
            threads: 0,
        }
    }
}

impl ReconcileConfig {
    /// The deactivation allow-list as a set
    #[must_use]
    pub fn recognized_types(&self) -> HashSet<String> {
        self.manifest_types.iter().cloned().collect()
    }
}

impl Config {
    /// Finder options for the scan section, sized by the performance section
    #[must_use]
    pub fn find_options(&self) -> FindOptions {
        self.scan
            .to_find_options()
            .threads(self.performance.parallel_threads)
    }

    /// Location of the user configuration file, if a config directory exists
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot read the configuration file
    /// - Configuration file contains invalid TOML
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }
}
