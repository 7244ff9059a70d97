use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use manifest_sync::{FindOptions, RemoteProject, find, reconcile_supported};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::tempdir;

fn create_test_tree(root: &Path, modules: usize) {
    for i in 0..modules {
        let module = root.join(format!("module_{i}"));
        let src = module.join("src/main/java");
        fs::create_dir_all(&src).unwrap();
        fs::write(module.join("pom.xml"), "<project/>").unwrap();
        for j in 0..10 {
            fs::write(src.join(format!("Class{j}.java")), "class C {}").unwrap();
        }

        let deps = module.join("node_modules/dep/lib");
        fs::create_dir_all(&deps).unwrap();
        fs::write(deps.join("package.json"), "{}").unwrap();
    }
}

fn benchmark_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for modules in [10, 100] {
        let dir = tempdir().unwrap();
        create_test_tree(dir.path(), modules);

        group.bench_with_input(BenchmarkId::new("all_files", modules), &modules, |b, _| {
            b.iter(|| find(black_box(dir.path()), &FindOptions::new()).unwrap());
        });

        let poms = FindOptions::new().include(["pom.xml"]);
        group.bench_with_input(BenchmarkId::new("pom_only", modules), &modules, |b, _| {
            b.iter(|| find(black_box(dir.path()), &poms).unwrap());
        });
    }

    group.finish();
}

fn benchmark_reconcile(c: &mut Criterion) {
    let manifests: Vec<String> = (0..5_000).map(|i| format!("module_{i}/pom.xml")).collect();
    let remote: Vec<RemoteProject> = (2_500..7_500)
        .map(|i| RemoteProject::new(format!("acme/app:module_{i}/pom.xml"), "maven"))
        .collect();

    c.bench_function("reconcile_5000", |b| {
        b.iter(|| {
            reconcile_supported(black_box(manifests.as_slice()), black_box(remote.as_slice()))
        });
    });
}

criterion_group!(benches, benchmark_find, benchmark_reconcile);
criterion_main!(benches);
