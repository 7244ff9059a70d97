use std::path::{Component, Path};

/// Converts a discovered file into the repo-relative form remote projects embed
///
/// Components are joined with `/` regardless of platform and carry no leading
/// separator, e.g. `services/api/pom.xml`. Returns `None` when `path` does not
/// live under `root` or names `root` itself.
#[must_use]
pub fn to_manifest_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let joined = join_normal_components(relative);
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Renders a path with `/` separators
#[must_use]
pub fn to_posix(path: &Path) -> String {
    let joined = join_normal_components(path);
    if path.has_root() {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Joins the normal components of a path with `/`, dropping roots, prefixes and `.`
fn join_normal_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
