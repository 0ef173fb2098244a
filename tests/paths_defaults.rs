use std::{fs, path::PathBuf};

use lintgate::{constants::PROJECT_CONFIG_FILE, javascript::paths::ProjectPaths};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("lintgate-paths-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn project_paths_defaults_are_consistent() {
    let root = temp_root();

    let via_new = ProjectPaths::new(root.clone());
    let via_parts = ProjectPaths::from_parts(root.clone(), None);
    let via_builder = lintgate::javascript::paths::project_paths()
        .root_dir(root.clone())
        .build();

    let snapshot =
        |p: &ProjectPaths| (p.root_dir().to_path_buf(), p.config_file().to_path_buf());

    assert_eq!(snapshot(&via_new), snapshot(&via_parts));
    assert_eq!(snapshot(&via_new), snapshot(&via_builder));
    assert_eq!(via_new.config_file(), root.join(PROJECT_CONFIG_FILE));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn config_file_overrides_resolve_against_root() {
    let root = temp_root();

    let relative = project_paths_with(&root, "lint/custom.json");
    assert_eq!(relative.config_file(), root.join("lint/custom.json"));

    let absolute_file = root.join("elsewhere.json");
    let absolute = project_paths_with(&root, absolute_file.to_str().expect("utf-8 path"));
    assert_eq!(absolute.config_file(), absolute_file);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn sources_resolve_against_root() {
    let root = temp_root();
    let paths = ProjectPaths::new(root.clone());

    assert_eq!(paths.resolve("src/App.js"), root.join("src/App.js"));
    let absolute = root.join("index.js");
    assert_eq!(paths.resolve(absolute.to_str().expect("utf-8 path")), absolute);

    let _ = fs::remove_dir_all(root);
}

fn project_paths_with(root: &std::path::Path, config: &str) -> ProjectPaths {
    lintgate::javascript::paths::project_paths()
        .root_dir(root)
        .config_file(config)
        .build()
}
