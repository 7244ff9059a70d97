use crate::config::Config;
use crate::matcher::GlobPattern;
use crate::supported::is_supported;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Flags configuration that would be silently ignored or rejected later
pub struct ConfigValidator {
    /// Fully qualified keys the schema understands
    known_fields: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a validator for the current schema
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "scan",
            "scan.exclude_patterns",
            "scan.include_patterns",
            "scan.max_depth",
            "scan.follow_symlinks",
            "reconcile",
            "reconcile.manifest_types",
            "performance",
            "performance.parallel_threads",
        ]
        .into_iter()
        .collect();

        Self { known_fields }
    }

    /// Check a configuration file on disk and log every warning found
    ///
    /// A missing file has nothing to warn about.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    pub fn validate_config_file(&self, config_path: &Path) -> Result<Vec<String>> {
        if !config_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        let parsed: toml::Value = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        let mut warnings = Vec::new();
        self.check_table(&parsed, "", &mut warnings);

        let config: Config = parsed.try_into()?;
        warnings.extend(self.validate(&config));

        for warning in &warnings {
            warn!(path = %config_path.display(), "{warning}");
        }

        Ok(warnings)
    }

    /// Semantic checks on an already parsed configuration
    #[must_use]
    pub fn validate(&self, config: &Config) -> Vec<String> {
        let mut warnings = Vec::new();

        for name in &config.reconcile.manifest_types {
            if !is_supported(name) {
                warnings.push(format!(
                    "Unknown manifest type '{name}': it contributes no include patterns"
                ));
            }
        }

        let patterns = config
            .scan
            .exclude_patterns
            .iter()
            .chain(&config.scan.include_patterns);
        for pattern in patterns {
            if let Err(e) = GlobPattern::new(pattern) {
                warnings.push(e.to_string());
            }
        }

        if !config.scan.exclude_patterns.is_empty()
            && !config.scan.exclude_patterns.iter().any(|p| p == "node_modules")
        {
            warnings.push(
                "scan.exclude_patterns replaces the default exclusions; node_modules will be scanned"
                    .to_string(),
            );
        }

        warnings
    }

    /// Recursively collects keys the schema does not know about
    fn check_table(&self, table: &toml::Value, prefix: &str, warnings: &mut Vec<String>) {
        if let toml::Value::Table(map) = table {
            for (key, value) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                if !self.known_fields.contains(full_key.as_str()) {
                    warnings.push(format!("Unknown configuration field: {full_key}"));
                } else if let toml::Value::Table(_) = value {
                    self.check_table(value, &full_key, warnings);
                }
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
