use manifest_sync::supported::default_recognized_types;
use manifest_sync::{ReconciliationResult, RemoteProject, reconcile, reconcile_supported};
use std::collections::HashSet;

fn maven_only() -> HashSet<String> {
    HashSet::from(["maven".to_string()])
}

#[test]
fn test_registered_manifest_kept_and_stale_one_deactivated() {
    let remote = vec![
        RemoteProject::new("org:a/pom.xml", "maven"),
        RemoteProject::new("org:b/pom.xml", "maven"),
    ];

    let result = reconcile(&["a/pom.xml"], &remote, &maven_only());

    assert_eq!(
        result,
        ReconciliationResult {
            import: vec![],
            deactivate: vec![RemoteProject::new("org:b/pom.xml", "maven")],
        }
    );
}

#[test]
fn test_new_manifests_imported_in_input_order() {
    let remote = vec![RemoteProject::new("org/repo:pom.xml", "maven")];

    let result = reconcile(
        &["services/web/package.json", "pom.xml", "services/api/pom.xml"],
        &remote,
        &default_recognized_types(),
    );

    assert_eq!(
        result.import,
        vec!["services/web/package.json", "services/api/pom.xml"]
    );
    assert!(result.deactivate.is_empty());
}

#[test]
fn test_stale_project_of_unmanaged_type_never_deactivated() {
    let remote = vec![
        RemoteProject::new("org:gone/pom.xml", "maven"),
        RemoteProject::new("org:gone/package.json", "npm"),
    ];

    let result = reconcile::<&str>(&[], &remote, &maven_only());

    assert_eq!(
        result.deactivate,
        vec![RemoteProject::new("org:gone/pom.xml", "maven")]
    );
}

#[test]
fn test_empty_manifests_deactivate_everything_recognized() {
    let remote = vec![
        RemoteProject::new("org:a/pom.xml", "maven"),
        RemoteProject::new("org:b/build.gradle", "gradle"),
    ];

    let result = reconcile_supported::<&str>(&[], &remote);

    assert!(result.import.is_empty());
    assert_eq!(result.deactivate, remote);
}

#[test]
fn test_empty_remote_imports_everything() {
    let manifests = ["a/pom.xml", "b/package.json"];

    let result = reconcile(&manifests, &[], &default_recognized_types());

    assert_eq!(result.import, manifests);
    assert!(result.deactivate.is_empty());
}

#[test]
fn test_both_sides_empty() {
    let result = reconcile::<String>(&[], &[], &HashSet::new());
    assert!(result.is_empty());
}

#[test]
fn test_keys_compare_exactly() {
    // "./a/pom.xml" and "a/pom.xml" are different keys; normalizing is the caller's job
    let remote = vec![RemoteProject::new("org:a/pom.xml", "maven")];

    let result = reconcile(&["./a/pom.xml"], &remote, &maven_only());

    assert_eq!(result.import, vec!["./a/pom.xml"]);
    assert_eq!(result.deactivate, remote);
}

#[test]
fn test_same_manifest_in_two_targets() {
    let remote = vec![
        RemoteProject::new("org/one:pom.xml", "maven"),
        RemoteProject::new("org/two:pom.xml", "maven"),
    ];

    let result = reconcile(&["pom.xml"], &remote, &maven_only());

    assert!(result.is_empty());
}

#[test]
fn test_reconcile_is_idempotent() {
    let manifests = vec!["a/pom.xml".to_string(), "c/pom.xml".to_string()];
    let remote = vec![
        RemoteProject::new("org:a/pom.xml", "maven"),
        RemoteProject::new("org:b/pom.xml", "maven"),
    ];

    let first = reconcile(&manifests, &remote, &maven_only());
    let second = reconcile(&manifests, &remote, &maven_only());

    assert_eq!(first, second);
}

#[test]
fn test_result_serializes_with_type_field() -> anyhow::Result<()> {
    let result = ReconciliationResult {
        import: vec!["a/pom.xml".to_string()],
        deactivate: vec![RemoteProject::new("org:b/pom.xml", "maven")],
    };

    let text = toml::to_string(&result)?;

    assert!(text.contains("type = \"maven\""));
    assert!(!text.contains("project_type"));
    Ok(())
}
