#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Repository fixture mirroring a small multi-module Java repo
///
/// ```text
/// root/
///   maven/pom.xml
///   maven/test.txt
///   mvn/pom.xml
///   mvn/test.txt
///   node_modules/left-pad/package.json
///   node_modules/left-pad/notes.txt
///   node_modules/left-pad/lib/deep/nested/pom.xml
/// ```
pub struct FixtureRepo {
    pub temp_dir: TempDir,
}

impl FixtureRepo {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        for file in Self::all_relative() {
            let path = root.join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("fixture: {file}"))?;
        }

        Ok(Self { temp_dir })
    }

    pub fn all_relative() -> [&'static str; 7] {
        [
            "maven/pom.xml",
            "maven/test.txt",
            "mvn/pom.xml",
            "mvn/test.txt",
            "node_modules/left-pad/package.json",
            "node_modules/left-pad/notes.txt",
            "node_modules/left-pad/lib/deep/nested/pom.xml",
        ]
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute, sorted paths for the given relative ones
    pub fn expected(&self, relative: &[&str]) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = relative.iter().map(|r| self.path().join(r)).collect();
        paths.sort();
        paths
    }
}

/// Sort a file list for order-independent comparison
pub fn sorted(mut files: Vec<PathBuf>) -> Vec<PathBuf> {
    files.sort();
    files
}
