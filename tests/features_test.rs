use pymono::config::DocsTheme;
use pymono::features::{add_docs_dependencies, apps_with_dockerfile};
use std::fs;
use tempfile::tempdir;

const MANIFEST: &str = r#"[project]
name = "demo"
version = "0.1.0"

[dependency-groups]
dev = ["pytest>=8.0.0"]

[tool.poe.tasks]
test = "pytest"
"#;

#[test]
fn test_apps_with_dockerfile_scans_one_level() {
    let tmp = tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("apps/worker")).unwrap();
    fs::write(tmp.path().join("apps/worker/Dockerfile"), "FROM python").unwrap();
    fs::create_dir_all(tmp.path().join("apps/api")).unwrap();
    fs::create_dir_all(tmp.path().join("apps/cli/nested")).unwrap();
    fs::write(tmp.path().join("apps/cli/nested/Dockerfile"), "FROM python").unwrap();
    fs::create_dir_all(tmp.path().join("apps/batch")).unwrap();
    fs::write(tmp.path().join("apps/batch/Dockerfile"), "FROM python").unwrap();

    let apps = apps_with_dockerfile(tmp.path()).unwrap();
    assert_eq!(apps, vec!["batch".to_string(), "worker".to_string()]);
}

#[test]
fn test_apps_with_dockerfile_without_apps_dir() {
    let tmp = tempdir().unwrap();
    let apps = apps_with_dockerfile(tmp.path()).unwrap();
    assert!(apps.is_empty());
}

#[test]
fn test_add_docs_dependencies_appends_toolchain() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("pyproject.toml"), MANIFEST).unwrap();

    add_docs_dependencies(tmp.path(), DocsTheme::Material).unwrap();

    let raw = fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap();
    let manifest: toml::Table = raw.parse().unwrap();

    let dev: Vec<&str> = manifest["dependency-groups"]["dev"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(dev.contains(&"pytest>=8.0.0"));
    assert!(dev.contains(&"mkdocs>=1.6.0"));
    assert!(dev.contains(&"mkdocs-material>=9.5.0"));
    assert!(dev.contains(&"mkdocs-mermaid2-plugin>=1.1.0"));

    let tasks = manifest["tool"]["poe"]["tasks"].as_table().unwrap();
    assert_eq!(tasks["test"].as_str(), Some("pytest"));
    assert_eq!(tasks["docs"].as_str(), Some("mkdocs serve"));
    assert_eq!(tasks["docs-build"].as_str(), Some("mkdocs build"));
}

#[test]
fn test_add_docs_dependencies_shadcn_swaps_theme_package() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("pyproject.toml"), MANIFEST).unwrap();

    add_docs_dependencies(tmp.path(), DocsTheme::Shadcn).unwrap();

    let raw = fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap();
    assert!(raw.contains("mkdocs-terminal>=4.0.0"));
    assert!(!raw.contains("mkdocs-material"));
}

#[test]
fn test_add_docs_dependencies_does_not_duplicate() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("pyproject.toml"), MANIFEST).unwrap();

    add_docs_dependencies(tmp.path(), DocsTheme::Material).unwrap();
    add_docs_dependencies(tmp.path(), DocsTheme::Material).unwrap();

    let raw = fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap();
    assert_eq!(raw.matches("mkdocs>=1.6.0").count(), 1);
}

#[test]
fn test_add_docs_dependencies_matches_existing_package_at_any_version() {
    let tmp = tempdir().unwrap();
    let manifest = r#"[project]
name = "demo"

[dependency-groups]
dev = ["mkdocs>=1.6"]
"#;
    fs::write(tmp.path().join("pyproject.toml"), manifest).unwrap();

    add_docs_dependencies(tmp.path(), DocsTheme::Material).unwrap();

    let raw = fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap();
    let parsed: toml::Table = raw.parse().unwrap();
    let dev: Vec<&str> = parsed["dependency-groups"]["dev"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    // The existing mkdocs pin survives; only the missing packages join it.
    assert_eq!(
        dev,
        vec!["mkdocs>=1.6", "mkdocs-material>=9.5.0", "mkdocs-mermaid2-plugin>=1.1.0"]
    );
}

#[test]
fn test_add_docs_dependencies_preserves_existing_tasks() {
    let tmp = tempdir().unwrap();
    let manifest = r#"[project]
name = "demo"

[tool.poe.tasks]
docs = "python -m http.server"
"#;
    fs::write(tmp.path().join("pyproject.toml"), manifest).unwrap();

    add_docs_dependencies(tmp.path(), DocsTheme::Material).unwrap();

    let raw = fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap();
    let parsed: toml::Table = raw.parse().unwrap();
    let tasks = parsed["tool"]["poe"]["tasks"].as_table().unwrap();
    assert_eq!(tasks["docs"].as_str(), Some("python -m http.server"));
    assert_eq!(tasks["docs-build"].as_str(), Some("mkdocs build"));
}

#[test]
fn test_add_docs_dependencies_without_poe_tasks() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("pyproject.toml"), "[project]\nname = \"demo\"\n").unwrap();

    add_docs_dependencies(tmp.path(), DocsTheme::Material).unwrap();

    let raw = fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap();
    let manifest: toml::Table = raw.parse().unwrap();
    // The dev group is created; a missing task table is left alone.
    assert!(manifest["dependency-groups"]["dev"].as_array().is_some());
    assert!(!manifest.contains_key("tool"));
}
