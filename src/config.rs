//! Project configuration model.
//!
//! Every scaffolding choice is a closed enum; the string forms exist only at
//! the serialization boundary (CLI values, the persisted record, template
//! contexts). A fully populated [`ProjectConfig`] is the single input to the
//! generation engine.

use crate::error::{Error, Result};
use crate::naming;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall shape of the generated project. Chosen once at creation,
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStructure {
    /// uv workspace with shared-namespace packages under libs/ and apps/
    Monorepo,
    /// Conventional single package with a src/ layout
    Single,
}

/// Python versions the generated projects can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PythonVersion {
    #[serde(rename = "3.11")]
    Py311,
    #[serde(rename = "3.12")]
    Py312,
    #[serde(rename = "3.13")]
    Py313,
}

/// License families the scaffolding can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseType {
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "none")]
    None,
}

/// Documentation theme; selects a subtree of the embedded templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocsTheme {
    Material,
    Shadcn,
}

impl ProjectStructure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStructure::Monorepo => "monorepo",
            ProjectStructure::Single => "single",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "monorepo" => Ok(ProjectStructure::Monorepo),
            "single" => Ok(ProjectStructure::Single),
            _ => Err(unsupported("structure", value, "monorepo, single")),
        }
    }
}

impl PythonVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PythonVersion::Py311 => "3.11",
            PythonVersion::Py312 => "3.12",
            PythonVersion::Py313 => "3.13",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "3.11" => Ok(PythonVersion::Py311),
            "3.12" => Ok(PythonVersion::Py312),
            "3.13" => Ok(PythonVersion::Py313),
            _ => Err(unsupported("python version", value, "3.11, 3.12, 3.13")),
        }
    }

    /// PEP 508 requires-python constraint for this version.
    pub fn requires(&self) -> String {
        format!(">={}", self.as_str())
    }
}

impl LicenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseType::Mit => "MIT",
            LicenseType::Apache2 => "Apache-2.0",
            LicenseType::Gpl3 => "GPL-3.0",
            LicenseType::None => "none",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "MIT" => Ok(LicenseType::Mit),
            "Apache-2.0" => Ok(LicenseType::Apache2),
            "GPL-3.0" => Ok(LicenseType::Gpl3),
            "none" => Ok(LicenseType::None),
            _ => Err(unsupported("license", value, "MIT, Apache-2.0, GPL-3.0, none")),
        }
    }

    /// Template file stem under `licenses/`, or `None` when no LICENSE
    /// artifact should be generated.
    pub fn file_stem(&self) -> Option<&'static str> {
        match self {
            LicenseType::Mit => Some("MIT"),
            LicenseType::Apache2 => Some("Apache-2.0"),
            LicenseType::Gpl3 => Some("GPL-3.0"),
            LicenseType::None => None,
        }
    }
}

impl DocsTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocsTheme::Material => "material",
            DocsTheme::Shadcn => "shadcn",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "material" => Ok(DocsTheme::Material),
            "shadcn" => Ok(DocsTheme::Shadcn),
            _ => Err(unsupported("docs theme", value, "material, shadcn")),
        }
    }
}

impl Default for ProjectStructure {
    fn default() -> Self {
        ProjectStructure::Monorepo
    }
}

impl Default for PythonVersion {
    fn default() -> Self {
        PythonVersion::Py313
    }
}

impl Default for LicenseType {
    fn default() -> Self {
        LicenseType::Mit
    }
}

impl Default for DocsTheme {
    fn default() -> Self {
        DocsTheme::Material
    }
}

impl fmt::Display for ProjectStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DocsTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unsupported(field: &str, value: &str, expected: &str) -> Error {
    Error::UnsupportedValueError {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

/// Complete description of a project to generate.
///
/// `name` is the Python identifier form and `slug` the distribution form;
/// both are derived from the raw user input through the naming module before
/// this struct is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub structure: ProjectStructure,
    pub python_version: PythonVersion,
    pub license: LicenseType,
    pub with_samples: bool,
    pub with_docker: bool,
    pub with_ci: bool,
    pub with_pypi: bool,
    pub with_docs: bool,
    pub docs_theme: DocsTheme,
    pub with_precommit: bool,
    pub init_git: bool,
    pub auto_sync: bool,
    pub author_name: String,
    pub author_email: String,
    pub github_owner: String,
    pub github_repo: String,
}

impl ProjectConfig {
    /// Builds a config with defaults for everything except the name.
    pub fn new(raw_name: &str) -> Self {
        ProjectConfig {
            name: naming::normalize_identifier(raw_name),
            slug: naming::normalize_slug(raw_name),
            description: String::new(),
            structure: ProjectStructure::default(),
            python_version: PythonVersion::default(),
            license: LicenseType::default(),
            with_samples: false,
            with_docker: false,
            with_ci: false,
            with_pypi: false,
            with_docs: false,
            docs_theme: DocsTheme::default(),
            with_precommit: true,
            init_git: true,
            auto_sync: true,
            author_name: String::new(),
            author_email: String::new(),
            github_owner: String::new(),
            github_repo: String::new(),
        }
    }

    /// Shared import namespace of the generated packages.
    pub fn namespace(&self) -> String {
        naming::normalize_identifier(&self.name)
    }

    /// GitHub repository name, falling back to the slug when unset.
    pub fn github_repo_or_slug(&self) -> &str {
        if self.github_repo.is_empty() {
            &self.slug
        } else {
            &self.github_repo
        }
    }

    /// Builds the full project-level template context. Every template
    /// renders against this fixed variable set or a package overlay of it.
    pub fn template_context(&self) -> serde_json::Value {
        let copyright_holder = if self.author_name.is_empty() {
            self.slug.clone()
        } else {
            self.author_name.clone()
        };
        serde_json::json!({
            "project_name": self.name,
            "project_slug": self.slug,
            "project_description": self.description,
            "namespace": self.namespace(),
            "structure": self.structure.as_str(),
            "python_version": self.python_version.as_str(),
            "python_requires": self.python_version.requires(),
            "license": self.license.as_str(),
            "with_samples": self.with_samples,
            "with_docker": self.with_docker,
            "with_ci": self.with_ci,
            "with_pypi": self.with_pypi,
            "with_docs": self.with_docs,
            "docs_theme": self.docs_theme.as_str(),
            "with_precommit": self.with_precommit,
            "author_name": self.author_name,
            "author_email": self.author_email,
            "github_owner": self.github_owner,
            "github_repo": self.github_repo_or_slug(),
            "copyright_holder": copyright_holder,
            "year": chrono::Local::now().year(),
        })
    }
}

/// A workspace member to generate inside an existing monorepo.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageConfig {
    pub name: String,
    pub description: String,
    pub with_docker: bool,
}

/// Overlays package fields onto a project context. Package contexts are
/// always a superposition of the full project context plus these overrides.
pub fn package_context(
    project_context: &serde_json::Value,
    package: &PackageConfig,
) -> serde_json::Value {
    let mut context = project_context.clone();
    if let Some(map) = context.as_object_mut() {
        map.insert("package_name".to_string(), serde_json::json!(package.name));
        map.insert(
            "package_description".to_string(),
            serde_json::json!(package.description),
        );
        map.insert("package_docker".to_string(), serde_json::json!(package.with_docker));
    }
    context
}
