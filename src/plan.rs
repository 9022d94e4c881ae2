//! Two-phase generation.
//!
//! A [`Plan`] is a pure, ordered list of artifacts computed from
//! configuration alone; [`execute`] is the only place that touches the
//! filesystem. Anything the decision tree needs from the outside world (such
//! as which applications carry a Dockerfile) arrives as a parameter, so the
//! planning functions stay deterministic and directly testable.

use crate::config::{
    package_context, DocsTheme, PackageConfig, ProjectConfig, ProjectStructure,
};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// One planned filesystem artifact. Destinations are relative to the
/// project root.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// Create an empty directory
    Dir { dest: PathBuf },
    /// Render an embedded template into a file
    Render { template: String, dest: PathBuf, context: Value },
    /// Copy an embedded resource without rendering
    CopyStatic { template: String, dest: PathBuf },
    /// Create an empty marker file, e.g. `py.typed`
    Touch { dest: PathBuf },
}

impl Artifact {
    pub fn dest(&self) -> &Path {
        match self {
            Artifact::Dir { dest }
            | Artifact::Render { dest, .. }
            | Artifact::CopyStatic { dest, .. }
            | Artifact::Touch { dest } => dest,
        }
    }
}

/// An ordered artifact list for one generation step.
#[derive(Debug, Default)]
pub struct Plan {
    artifacts: Vec<Artifact>,
}

impl Plan {
    pub fn new() -> Self {
        Plan::default()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Iterates over all planned destination paths.
    pub fn dests(&self) -> impl Iterator<Item = &Path> {
        self.artifacts.iter().map(Artifact::dest)
    }

    pub fn extend(&mut self, other: Plan) {
        self.artifacts.extend(other.artifacts);
    }

    pub fn dir(&mut self, dest: impl Into<PathBuf>) {
        self.artifacts.push(Artifact::Dir { dest: dest.into() });
    }

    pub fn render(&mut self, template: &str, dest: impl Into<PathBuf>, context: &Value) {
        self.artifacts.push(Artifact::Render {
            template: template.to_string(),
            dest: dest.into(),
            context: context.clone(),
        });
    }

    pub fn copy(&mut self, template: &str, dest: impl Into<PathBuf>) {
        self.artifacts.push(Artifact::CopyStatic {
            template: template.to_string(),
            dest: dest.into(),
        });
    }

    pub fn touch(&mut self, dest: impl Into<PathBuf>) {
        self.artifacts.push(Artifact::Touch { dest: dest.into() });
    }
}

/// Computes the full artifact list for a new project.
///
/// `docker_apps` names the applications that will carry a Dockerfile once
/// this plan has run; for a fresh project that is the sample printer app
/// when samples and Docker are both requested.
pub fn project_plan(config: &ProjectConfig, docker_apps: &[String]) -> Plan {
    let context = config.template_context();
    let namespace = config.namespace();
    let mut plan = Plan::new();

    let root_manifest = match config.structure {
        ProjectStructure::Monorepo => "monorepo/pyproject.toml.j2",
        ProjectStructure::Single => "single/pyproject.toml.j2",
    };
    plan.render(root_manifest, "pyproject.toml", &context);
    plan.render("base/README.md.j2", "README.md", &context);
    plan.render("base/python-version.j2", ".python-version", &context);
    plan.copy("base/gitignore", ".gitignore");
    if let Some(stem) = config.license.file_stem() {
        plan.render(&format!("licenses/{}.j2", stem), "LICENSE", &context);
    }

    match config.structure {
        ProjectStructure::Monorepo => {
            plan.dir("libs");
            plan.dir("apps");
            if config.with_samples {
                plan.extend(sample_plan(&namespace, config.with_docker, &context));
            }
        }
        ProjectStructure::Single => {
            let package_root = Path::new("src").join(&namespace);
            plan.render(
                "single/package_init.py.j2",
                package_root.join("__init__.py"),
                &context,
            );
            plan.touch(package_root.join("py.typed"));
            plan.render("single/test_import.py.j2", "tests/test_import.py", &context);
        }
    }

    if config.with_precommit {
        plan.copy("tooling/pre-commit-config.yaml", ".pre-commit-config.yaml");
    }

    if config.with_docker {
        plan.extend(docker_plan(config.structure, &context, docker_apps));
    }

    if config.with_ci {
        plan.render("ci/pr.yml.j2", ".github/workflows/pr.yml", &context);
        if config.with_pypi {
            plan.render("ci/release.yml.j2", ".github/workflows/release.yml", &context);
        }
    }

    if config.with_docs {
        plan.extend(docs_plan(config.docs_theme, &context));
    }

    plan.copy("vscode/extensions.json", ".vscode/extensions.json");
    plan.render("vscode/settings.json.j2", ".vscode/settings.json", &context);

    plan
}

/// Artifacts for a library member under `libs/`.
pub fn lib_plan(namespace: &str, package: &PackageConfig, project_context: &Value) -> Plan {
    member_plan("libs", "monorepo/lib", namespace, package, project_context, false)
}

/// Artifacts for an application member under `apps/`.
pub fn app_plan(namespace: &str, package: &PackageConfig, project_context: &Value) -> Plan {
    let with_dockerfile = package.with_docker;
    member_plan("apps", "monorepo/app", namespace, package, project_context, with_dockerfile)
}

fn member_plan(
    collection: &str,
    template_prefix: &str,
    namespace: &str,
    package: &PackageConfig,
    project_context: &Value,
    with_dockerfile: bool,
) -> Plan {
    let context = package_context(project_context, package);
    let root = Path::new(collection).join(&package.name);
    let mut plan = Plan::new();

    plan.render(
        &format!("{}/pyproject.toml.j2", template_prefix),
        root.join("pyproject.toml"),
        &context,
    );
    plan.render(
        &format!("{}/package_init.py.j2", template_prefix),
        root.join(namespace).join(&package.name).join("__init__.py"),
        &context,
    );
    // py.typed at both the namespace and the package level so type
    // checkers resolve the shared namespace.
    plan.touch(root.join(namespace).join("py.typed"));
    plan.touch(root.join(namespace).join(&package.name).join("py.typed"));
    plan.render(
        &format!("{}/test_import.py.j2", template_prefix),
        root.join("tests").join(format!("test_{}_import.py", package.name)),
        &context,
    );
    if with_dockerfile {
        plan.render("monorepo/app/Dockerfile.j2", root.join("Dockerfile"), &context);
    }

    plan
}

/// Sample packages: a greeter library plus a printer application that
/// imports it through the shared namespace.
fn sample_plan(namespace: &str, with_docker: bool, project_context: &Value) -> Plan {
    let greeter = PackageConfig {
        name: "greeter".to_string(),
        description: "Sample shared library that renders a greeting".to_string(),
        with_docker: false,
    };
    let printer = PackageConfig {
        name: "printer".to_string(),
        description: "Sample application that prints a greeting".to_string(),
        with_docker,
    };

    let mut plan = member_plan("libs", "samples/greeter", namespace, &greeter, project_context, false);
    plan.extend(member_plan(
        "apps",
        "samples/printer",
        namespace,
        &printer,
        project_context,
        with_docker,
    ));
    plan
}

/// Docker packaging artifacts.
///
/// The ignore file is unconditional. A single-package project gets a root
/// Dockerfile plus compose and bake; a monorepo gets compose and bake only
/// when at least one application carries a Dockerfile, since the services
/// enumerate those applications.
pub fn docker_plan(structure: ProjectStructure, context: &Value, docker_apps: &[String]) -> Plan {
    let mut plan = Plan::new();
    plan.copy("docker/dockerignore", ".dockerignore");

    let compose_context = with_docker_apps(context, docker_apps);
    match structure {
        ProjectStructure::Single => {
            plan.render("docker/Dockerfile.j2", "Dockerfile", &compose_context);
            plan.render("docker/docker-compose.yml.j2", "docker-compose.yml", &compose_context);
            plan.render("docker/docker-bake.hcl.j2", "docker-bake.hcl", &compose_context);
        }
        ProjectStructure::Monorepo => {
            if !docker_apps.is_empty() {
                plan.render(
                    "docker/docker-compose.yml.j2",
                    "docker-compose.yml",
                    &compose_context,
                );
                plan.render("docker/docker-bake.hcl.j2", "docker-bake.hcl", &compose_context);
            }
        }
    }
    plan
}

/// Documentation artifacts: the theme-specific subtree renders the same
/// logical document set regardless of theme.
pub fn docs_plan(theme: DocsTheme, context: &Value) -> Plan {
    let mut plan = Plan::new();
    let prefix = format!("docs/{}", theme.as_str());
    plan.render(&format!("{}/mkdocs.yml.j2", prefix), "mkdocs.yml", context);
    plan.render(&format!("{}/index.md.j2", prefix), "docs/index.md", context);
    plan.render(&format!("{}/getting-started.md.j2", prefix), "docs/getting-started.md", context);
    plan.render(&format!("{}/architecture.md.j2", prefix), "docs/architecture.md", context);
    plan
}

fn with_docker_apps(context: &Value, docker_apps: &[String]) -> Value {
    let mut context = context.clone();
    if let Some(map) = context.as_object_mut() {
        map.insert("docker_apps".to_string(), serde_json::json!(docker_apps));
    }
    context
}

/// Materializes a plan under `root`, in order, and returns the created
/// paths. There is no rollback; on failure everything written so far stays
/// on disk and the error propagates.
pub fn execute(plan: &Plan, root: &Path, renderer: &dyn TemplateRenderer) -> Result<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(plan.len());
    for artifact in plan.artifacts() {
        let dest = root.join(artifact.dest());
        match artifact {
            Artifact::Dir { .. } => {
                fs::create_dir_all(&dest).map_err(Error::IoError)?;
            }
            Artifact::Render { template, context, .. } => {
                renderer.render_to_file(template, &dest, context)?;
            }
            Artifact::CopyStatic { template, .. } => {
                renderer.copy_static(template, &dest)?;
            }
            Artifact::Touch { .. } => {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent).map_err(Error::IoError)?;
                }
                fs::write(&dest, b"").map_err(Error::IoError)?;
            }
        }
        log::debug!("created: {}", dest.display());
        created.push(dest);
    }
    Ok(created)
}
