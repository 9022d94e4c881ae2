//! Post-creation feature enablement: `add docker`, `add ci`, `add pypi`
//! and `add docs`.
//!
//! All four share the same frame. The project is located through its
//! record; an already-set feature flag short-circuits into a stdout notice
//! and success, so re-running an `add` never overwrites anything. State
//! detection goes through the record, not filesystem heuristics.

use crate::config::{DocsTheme, ProjectStructure};
use crate::error::{Error, Result};
use crate::plan::{docker_plan, docs_plan, execute, Plan};
use crate::record::ProjectRecord;
use crate::renderer::TemplateRenderer;
use crate::sync;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Enables Docker packaging.
///
/// A monorepo only receives compose and bake files when at least one
/// application already carries a Dockerfile; the services enumerate those
/// applications.
pub fn add_docker(renderer: &dyn TemplateRenderer) -> Result<()> {
    let (root, mut record) = load_nearest()?;
    if record.features.docker {
        println!("Docker support is already enabled for this project.");
        return Ok(());
    }

    let config = record.to_config();
    let context = config.template_context();
    let docker_apps = match config.structure {
        ProjectStructure::Single => Vec::new(),
        ProjectStructure::Monorepo => apps_with_dockerfile(&root)?,
    };
    if config.structure == ProjectStructure::Monorepo && docker_apps.is_empty() {
        println!("No applications with a Dockerfile were found; skipping docker-compose.yml.");
        println!("Add one with 'pymono add app <name> --with-docker'.");
    }

    let plan = docker_plan(config.structure, &context, &docker_apps);
    execute(&plan, &root, renderer)?;

    record.features.docker = true;
    record.save(&root)?;
    println!("Enabled Docker support.");
    Ok(())
}

/// Enables the PR validation workflow.
pub fn add_ci(renderer: &dyn TemplateRenderer) -> Result<()> {
    let (root, mut record) = load_nearest()?;
    if record.features.ci {
        println!("CI is already enabled for this project.");
        return Ok(());
    }

    let config = record.to_config();
    let context = config.template_context();
    let mut plan = Plan::new();
    plan.render("ci/pr.yml.j2", ".github/workflows/pr.yml", &context);
    execute(&plan, &root, renderer)?;

    record.features.ci = true;
    record.save(&root)?;
    println!("Enabled CI (.github/workflows/pr.yml).");
    Ok(())
}

/// Enables the PyPI release workflow. Running this without CI is allowed
/// but flagged as likely unintended.
pub fn add_pypi(renderer: &dyn TemplateRenderer) -> Result<()> {
    let (root, mut record) = load_nearest()?;
    if record.features.pypi {
        println!("PyPI publishing is already enabled for this project.");
        return Ok(());
    }
    if !record.features.ci {
        log::warn!("CI is not enabled for this project. Consider 'pymono add ci' first.");
    }

    let config = record.to_config();
    let context = config.template_context();
    let mut plan = Plan::new();
    plan.render("ci/release.yml.j2", ".github/workflows/release.yml", &context);
    execute(&plan, &root, renderer)?;

    record.features.pypi = true;
    record.save(&root)?;
    println!("Enabled PyPI publishing (.github/workflows/release.yml).");
    Ok(())
}

/// Enables mkdocs documentation with the given theme (default material).
///
/// Adds the documentation toolchain to the root manifest's dev group, syncs
/// dependencies so mkdocs is available, then renders the theme subtree.
pub fn add_docs(theme: Option<DocsTheme>, renderer: &dyn TemplateRenderer) -> Result<()> {
    let (root, mut record) = load_nearest()?;
    if record.features.docs {
        println!(
            "Docs are already enabled for this project (theme: {}).",
            record.features.docs_theme
        );
        return Ok(());
    }

    let theme = theme.unwrap_or_default();
    add_docs_dependencies(&root, theme)?;

    let config = record.to_config();
    sync::run_sync(&root, config.structure);

    let context = config.template_context();
    let plan = docs_plan(theme, &context);
    execute(&plan, &root, renderer)?;

    record.features.docs = true;
    record.features.docs_theme = theme;
    record.save(&root)?;
    println!("Enabled documentation (theme: {}). Serve it with 'uv run poe docs'.", theme);
    Ok(())
}

/// Scans `apps/*/` one level deep for Dockerfiles and returns the owning
/// application names, sorted.
pub fn apps_with_dockerfile(root: &Path) -> Result<Vec<String>> {
    let apps_dir = root.join("apps");
    if !apps_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut apps = Vec::new();
    for entry in WalkDir::new(&apps_dir).min_depth(2).max_depth(2) {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        if entry.file_type().is_file() && entry.file_name() == "Dockerfile" {
            if let Some(app) = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .and_then(|name| name.to_str())
            {
                apps.push(app.to_string());
            }
        }
    }
    apps.sort();
    Ok(apps)
}

/// Documentation dependencies per theme, as written into the dev group.
fn docs_dependencies(theme: DocsTheme) -> &'static [&'static str] {
    match theme {
        DocsTheme::Material => {
            &["mkdocs>=1.6.0", "mkdocs-material>=9.5.0", "mkdocs-mermaid2-plugin>=1.1.0"]
        }
        DocsTheme::Shadcn => {
            &["mkdocs>=1.6.0", "mkdocs-terminal>=4.0.0", "mkdocs-mermaid2-plugin>=1.1.0"]
        }
    }
}

/// Leading package name of a PEP 508 dependency specifier.
fn package_name(specifier: &str) -> &str {
    specifier
        .find(|c: char| matches!(c, '>' | '<' | '=' | '~' | '!' | '[' | ' ' | ';'))
        .map_or(specifier, |at| &specifier[..at])
}

/// Rewrites the root `pyproject.toml`, appending the documentation
/// toolchain to `dependency-groups.dev` (an existing entry for the same
/// package, at any version, counts as present) and filling in absent
/// `docs`/`docs-build` tasks when a `tool.poe.tasks` table already exists.
/// Comments in the manifest are not preserved.
pub fn add_docs_dependencies(root: &Path, theme: DocsTheme) -> Result<()> {
    let manifest_path = root.join("pyproject.toml");
    let raw = fs::read_to_string(&manifest_path).map_err(Error::IoError)?;
    let mut manifest: toml::Table = raw.parse()?;

    let groups = manifest
        .entry("dependency-groups")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    if let Some(groups) = groups.as_table_mut() {
        let dev = groups
            .entry("dev")
            .or_insert_with(|| toml::Value::Array(Vec::new()));
        if let Some(dev) = dev.as_array_mut() {
            for &dep in docs_dependencies(theme) {
                let name = package_name(dep);
                let present = dev.iter().any(|existing| {
                    existing.as_str().is_some_and(|spec| package_name(spec) == name)
                });
                if !present {
                    dev.push(toml::Value::String(dep.to_string()));
                }
            }
        }
    }

    let tasks = manifest
        .get_mut("tool")
        .and_then(toml::Value::as_table_mut)
        .and_then(|tool| tool.get_mut("poe"))
        .and_then(toml::Value::as_table_mut)
        .and_then(|poe| poe.get_mut("tasks"))
        .and_then(toml::Value::as_table_mut);
    if let Some(tasks) = tasks {
        for (task, command) in [("docs", "mkdocs serve"), ("docs-build", "mkdocs build")] {
            tasks
                .entry(task)
                .or_insert_with(|| toml::Value::String(command.to_string()));
        }
    }

    fs::write(&manifest_path, toml::to_string_pretty(&manifest)?).map_err(Error::IoError)
}

fn load_nearest() -> Result<(PathBuf, ProjectRecord)> {
    let start_dir = std::env::current_dir().map_err(Error::IoError)?;
    ProjectRecord::load_nearest(&start_dir)
}
