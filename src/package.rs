//! Adding workspace members to an existing monorepo.
//!
//! The persisted record is the source of truth here: namespace, python
//! version and project metadata come from `pymono.toml`, never from flags,
//! so members always join the workspace the project was created with.

use crate::config::{PackageConfig, ProjectStructure};
use crate::error::{Error, Result};
use crate::naming;
use crate::plan::{app_plan, execute, lib_plan};
use crate::record::ProjectRecord;
use crate::renderer::TemplateRenderer;
use std::fmt;
use std::fs;

/// Which collection a new member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Lib,
    App,
}

impl PackageKind {
    pub fn collection_dir(&self) -> &'static str {
        match self {
            PackageKind::Lib => "libs",
            PackageKind::App => "apps",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            PackageKind::Lib => "library",
            PackageKind::App => "application",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Lib => f.write_str("lib"),
            PackageKind::App => f.write_str("app"),
        }
    }
}

/// Adds a member package to the nearest monorepo.
pub fn add_package(
    kind: PackageKind,
    raw_name: &str,
    description: Option<String>,
    with_docker: bool,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    let start_dir = std::env::current_dir().map_err(Error::IoError)?;
    let (root, record) = ProjectRecord::load_nearest(&start_dir)?;

    if record.generation.structure != ProjectStructure::Monorepo {
        return Err(Error::SinglePackageLayoutError);
    }
    naming::validate_name(raw_name)?;

    let name = naming::normalize_identifier(raw_name);
    let package = PackageConfig {
        description: description.unwrap_or_else(|| format!("The {} {}", name, kind.noun())),
        name,
        with_docker,
    };

    let dest = root.join(kind.collection_dir()).join(&package.name);
    if dest.is_dir() && fs::read_dir(&dest).map_err(Error::IoError)?.next().is_some() {
        return Err(Error::PackageExistsError { package_dir: dest.display().to_string() });
    }

    let config = record.to_config();
    let context = config.template_context();
    let plan = match kind {
        PackageKind::Lib => lib_plan(&config.namespace(), &package, &context),
        PackageKind::App => app_plan(&config.namespace(), &package, &context),
    };
    execute(&plan, &root, renderer)?;

    println!(
        "Added {} '{}' under {}/.",
        kind.noun(),
        package.name,
        kind.collection_dir()
    );
    println!("Run 'uv sync --all-packages' to register it with the workspace.");
    Ok(())
}
