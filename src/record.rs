//! The persisted scaffolding record.
//!
//! Every generated project carries a `pymono.toml` at its root describing
//! the choices made at creation time. The `add` commands locate the project
//! through this marker file and read namespace, python version and feature
//! state from it instead of re-deriving anything from the tree.

use crate::config::{
    DocsTheme, LicenseType, ProjectConfig, ProjectStructure, PythonVersion,
};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name that marks a project root.
pub const RECORD_FILE: &str = "pymono.toml";

const RECORD_HEADER: &str = "\
# pymono.toml - project scaffolding record
# Stores the choices made when this project was generated so that
# `pymono add` commands understand the existing layout.

";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSection {
    #[serde(default = "tool_version")]
    pub version: String,
    /// Timezone-aware creation timestamp; a record missing this field
    /// loads as freshly created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn tool_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ToolSection {
    fn default() -> Self {
        ToolSection { version: tool_version(), created_at: Utc::now() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    pub structure: ProjectStructure,
    pub python_version: PythonVersion,
    pub license: LicenseType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSection {
    pub samples: bool,
    pub docker: bool,
    pub ci: bool,
    pub pypi: bool,
    pub docs: bool,
    pub docs_theme: DocsTheme,
    /// On for fresh projects; a record missing this field loads as on.
    #[serde(default = "default_precommit")]
    pub precommit: bool,
}

fn default_precommit() -> bool {
    true
}

impl Default for FeatureSection {
    fn default() -> Self {
        FeatureSection {
            samples: false,
            docker: false,
            ci: false,
            pypi: false,
            docs: false,
            docs_theme: DocsTheme::default(),
            precommit: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSection {
    pub author_name: String,
    pub author_email: String,
    pub github_owner: String,
    pub github_repo: String,
}

/// The record as persisted in `pymono.toml`. Unknown fields are ignored and
/// missing fields fall back to the defaults a fresh construction would use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "pymono", default)]
    pub tool: ToolSection,
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub features: FeatureSection,
    #[serde(default)]
    pub metadata: MetadataSection,
}

impl ProjectRecord {
    pub fn from_config(config: &ProjectConfig) -> Self {
        ProjectRecord {
            tool: ToolSection::default(),
            project: ProjectSection {
                name: config.name.clone(),
                slug: config.slug.clone(),
                description: config.description.clone(),
            },
            generation: GenerationSection {
                structure: config.structure,
                python_version: config.python_version,
                license: config.license,
            },
            features: FeatureSection {
                samples: config.with_samples,
                docker: config.with_docker,
                ci: config.with_ci,
                pypi: config.with_pypi,
                docs: config.with_docs,
                docs_theme: config.docs_theme,
                precommit: config.with_precommit,
            },
            metadata: MetadataSection {
                author_name: config.author_name.clone(),
                author_email: config.author_email.clone(),
                github_owner: config.github_owner.clone(),
                github_repo: config.github_repo.clone(),
            },
        }
    }

    /// Reconstructs a [`ProjectConfig`] from the recorded state. Behavior
    /// flags that are not persisted (git init, auto sync) come back as
    /// defaults.
    pub fn to_config(&self) -> ProjectConfig {
        let mut config = ProjectConfig::new(&self.project.name);
        config.slug = self.project.slug.clone();
        config.description = self.project.description.clone();
        config.structure = self.generation.structure;
        config.python_version = self.generation.python_version;
        config.license = self.generation.license;
        config.with_samples = self.features.samples;
        config.with_docker = self.features.docker;
        config.with_ci = self.features.ci;
        config.with_pypi = self.features.pypi;
        config.with_docs = self.features.docs;
        config.docs_theme = self.features.docs_theme;
        config.with_precommit = self.features.precommit;
        config.author_name = self.metadata.author_name.clone();
        config.author_email = self.metadata.author_email.clone();
        config.github_owner = self.metadata.github_owner.clone();
        config.github_repo = self.metadata.github_repo.clone();
        config
    }

    /// Loads the record from `root/pymono.toml`.
    pub fn load(root: &Path) -> Result<Self> {
        let raw = fs::read_to_string(root.join(RECORD_FILE)).map_err(Error::IoError)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Writes the record to `root/pymono.toml` with its header comment.
    pub fn save(&self, root: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self)?;
        fs::write(root.join(RECORD_FILE), format!("{}{}", RECORD_HEADER, body))
            .map_err(Error::IoError)
    }

    /// Walks up from `start` to the nearest project root and loads its
    /// record.
    pub fn load_nearest(start: &Path) -> Result<(PathBuf, Self)> {
        let root = find_project_root(start).ok_or_else(|| Error::ProjectNotFoundError {
            start_dir: start.display().to_string(),
        })?;
        let record = Self::load(&root)?;
        Ok((root, record))
    }
}

/// Returns the nearest ancestor of `start` (including `start` itself) that
/// contains a `pymono.toml`. Only the record file marks a project root;
/// workspace sections in `pyproject.toml` deliberately do not count.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(RECORD_FILE).is_file())
        .map(Path::to_path_buf)
}
