//! Manifest types recognized by default and the file names that identify them.

use std::collections::HashSet;

/// A project type and the file patterns of its manifests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestType {
    /// Project type as reported by the remote system (e.g. `maven`)
    pub name: &'static str,
    /// Glob patterns matching manifests of this type
    pub patterns: &'static [&'static str],
}

/// Every open-source package manager type this crate knows about
pub const MANIFEST_TYPES: &[ManifestType] = &[
    ManifestType {
        name: "npm",
        patterns: &["package.json"],
    },
    ManifestType {
        name: "yarn",
        patterns: &["yarn.lock"],
    },
    ManifestType {
        name: "rubygems",
        patterns: &["Gemfile.lock"],
    },
    ManifestType {
        name: "maven",
        patterns: &["pom.xml"],
    },
    ManifestType {
        name: "gradle",
        patterns: &["build.gradle", "build.gradle.kts"],
    },
    ManifestType {
        name: "sbt",
        patterns: &["build.sbt"],
    },
    ManifestType {
        name: "pip",
        patterns: &["*req*.txt", "**/requirements/*.txt"],
    },
    ManifestType {
        name: "poetry",
        patterns: &["pyproject.toml", "poetry.lock"],
    },
    ManifestType {
        name: "golangdep",
        patterns: &["Gopkg.lock"],
    },
    ManifestType {
        name: "govendor",
        patterns: &["vendor.json"],
    },
    ManifestType {
        name: "gomodules",
        patterns: &["go.mod"],
    },
    ManifestType {
        name: "nuget",
        patterns: &[
            "packages.config",
            "*.csproj",
            "*.fsproj",
            "*.vbproj",
            "project.json",
            "project.assets.json",
            "*.targets",
            "*.props",
            "packages*.lock.json",
            "global.json",
        ],
    },
    ManifestType {
        name: "paket",
        patterns: &["paket.dependencies"],
    },
    ManifestType {
        name: "composer",
        patterns: &["composer.lock"],
    },
    ManifestType {
        name: "cocoapods",
        patterns: &["Podfile", "Podfile.lock"],
    },
    ManifestType {
        name: "hex",
        patterns: &["mix.exs"],
    },
    ManifestType {
        name: "swift",
        patterns: &["Package.swift"],
    },
];

/// Names of all supported manifest types
pub fn supported_types() -> impl Iterator<Item = &'static str> {
    MANIFEST_TYPES.iter().map(|t| t.name)
}

/// Returns true if `name` is a supported manifest type
#[must_use]
pub fn is_supported(name: &str) -> bool {
    lookup(name).is_some()
}

/// Look up a manifest type by name
#[must_use]
pub fn lookup(name: &str) -> Option<&'static ManifestType> {
    MANIFEST_TYPES.iter().find(|t| t.name == name)
}

/// The allow-list used when the caller does not narrow it
#[must_use]
pub fn default_recognized_types() -> HashSet<String> {
    supported_types().map(str::to_string).collect()
}

/// Include patterns for the given types, first occurrence order, no duplicates
///
/// Unknown type names contribute nothing.
#[must_use]
pub fn manifest_patterns<S: AsRef<str>>(types: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    types
        .iter()
        .filter_map(|t| lookup(t.as_ref()))
        .flat_map(|t| t.patterns.iter())
        .filter(|p| seen.insert(**p))
        .map(|p| (*p).to_string())
        .collect()
}
