//! Project generation: turns a [`ProjectConfig`] into a directory tree, a
//! scaffolding record and, best-effort, a git repository with synced
//! dependencies.

use crate::config::{ProjectConfig, ProjectStructure};
use crate::error::{Error, Result};
use crate::plan::{execute, project_plan};
use crate::record::ProjectRecord;
use crate::renderer::TemplateRenderer;
use crate::{git, sync};
use std::fs;
use std::path::{Path, PathBuf};

/// Generates a complete project at `output_dir`.
///
/// Precondition checks run before anything is written. Once execution
/// starts there is no rollback; a failure leaves the partial tree in place
/// and propagates.
pub fn generate_project(
    config: &ProjectConfig,
    output_dir: &Path,
    renderer: &dyn TemplateRenderer,
    force: bool,
) -> Result<()> {
    let output_dir = ensure_output_dir(output_dir, force)?;

    if config.with_pypi && !config.with_ci {
        log::warn!(
            "PyPI publishing is enabled without CI; no release workflow will be generated until CI is added."
        );
    }

    let docker_apps = planned_docker_apps(config);
    let plan = project_plan(config, &docker_apps);
    let created = execute(&plan, &output_dir, renderer)?;

    ProjectRecord::from_config(config).save(&output_dir)?;

    if config.init_git {
        if let Err(err) = git::init_repository(&output_dir) {
            log::warn!("Could not initialize a git repository: {}.", err.message());
        }
    }
    if config.auto_sync {
        sync::run_sync(&output_dir, config.structure);
    }

    println!(
        "Created {} project '{}' in '{}' ({} files).",
        config.structure,
        config.slug,
        output_dir.display(),
        created.len()
    );
    print_next_steps(config, &output_dir);
    Ok(())
}

/// Applications that will carry a Dockerfile once the fresh project plan
/// has run: only the sample printer, and only when samples and Docker are
/// both requested.
pub fn planned_docker_apps(config: &ProjectConfig) -> Vec<String> {
    if config.structure == ProjectStructure::Monorepo
        && config.with_samples
        && config.with_docker
    {
        vec!["printer".to_string()]
    } else {
        Vec::new()
    }
}

/// Refuses to write into an existing non-empty target unless forced.
fn ensure_output_dir(output_dir: &Path, force: bool) -> Result<PathBuf> {
    if output_dir.exists() && !force {
        let occupied = output_dir.is_file()
            || fs::read_dir(output_dir).map_err(Error::IoError)?.next().is_some();
        if occupied {
            return Err(Error::OutputDirectoryExistsError {
                output_dir: output_dir.display().to_string(),
            });
        }
    }
    Ok(output_dir.to_path_buf())
}

fn print_next_steps(config: &ProjectConfig, output_dir: &Path) {
    println!();
    println!("Next steps:");
    println!("  cd {}", output_dir.display());
    if !config.auto_sync {
        match config.structure {
            ProjectStructure::Monorepo => println!("  uv sync --all-packages"),
            ProjectStructure::Single => println!("  uv sync"),
        }
    }
    println!("  uv run poe check");
    if config.with_docs {
        println!("  uv run poe docs");
    }
}
