use manifest_sync::{ProjectKey, RemoteProject, reconcile};
use proptest::prelude::*;
use std::collections::HashSet;

const TYPES: &[&str] = &["maven", "npm", "gradle", "dockerfile"];

fn manifest_path() -> impl Strategy<Value = String> {
    // Colon-free, like real repo-relative paths
    "[a-c]{1,2}/(pom\\.xml|package\\.json|build\\.gradle)"
}

fn remote_project() -> impl Strategy<Value = RemoteProject> {
    ("[a-z]{1,4}", manifest_path(), prop::sample::select(TYPES))
        .prop_map(|(target, path, kind)| RemoteProject::new(format!("{target}:{path}"), kind))
}

fn recognized() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set(prop::sample::select(TYPES).prop_map(str::to_string), 0..4)
}

proptest! {
    #[test]
    fn test_reconcile_invariants(
        manifests in prop::collection::vec(manifest_path(), 0..12),
        remote in prop::collection::vec(remote_project(), 0..12),
        types in recognized(),
    ) {
        let result = reconcile(&manifests, &remote, &types);

        let local: HashSet<&str> = manifests.iter().map(String::as_str).collect();
        let monitored: HashSet<&str> = remote
            .iter()
            .filter_map(|p| p.key().manifest_path)
            .collect();

        // Imports are local, unmonitored and unique
        let imported: HashSet<&str> = result.import.iter().map(String::as_str).collect();
        prop_assert_eq!(imported.len(), result.import.len());
        for path in &result.import {
            prop_assert!(local.contains(path.as_str()));
            prop_assert!(!monitored.contains(path.as_str()));
        }
        let expected_imports = local.iter().filter(|m| !monitored.contains(*m)).count();
        prop_assert_eq!(result.import.len(), expected_imports);

        // Deactivations are exactly the stale, recognized projects
        let expected: Vec<&RemoteProject> = remote
            .iter()
            .filter(|p| {
                let key = p.key().manifest_path.unwrap_or_default();
                !local.contains(key) && types.contains(&p.project_type)
            })
            .collect();
        let actual: Vec<&RemoteProject> = result.deactivate.iter().collect();
        prop_assert_eq!(actual, expected);

        // Pure function
        prop_assert_eq!(reconcile(&manifests, &remote, &types), result);
    }

    #[test]
    fn test_key_parse_rejoins_to_name(target in "[^:]*", path in ".*") {
        let name = format!("{target}:{path}");
        let key = ProjectKey::parse(&name);

        prop_assert_eq!(key.target_id, target.as_str());
        prop_assert_eq!(key.manifest_path, Some(path.as_str()));
    }

    #[test]
    fn test_key_parse_without_colon(name in "[^:]*") {
        let key = ProjectKey::parse(&name);

        prop_assert_eq!(key.target_id, name.as_str());
        prop_assert_eq!(key.manifest_path, None);
    }
}
