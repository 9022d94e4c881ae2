//! pymono is a scaffolding tool for uv-based Python projects.
//! It generates shared-namespace monorepos (or conventional single packages)
//! from embedded templates and grows them afterwards with packages and features.

/// Command-line interface module for the pymono application
pub mod cli;

/// Project and package configuration
/// Closed sets of supported structures, Python versions, licenses and themes,
/// plus the template context built from them
pub mod config;

/// Error types and handling for the pymono application
pub mod error;

/// Retrofitting features (docker, ci, pypi, docs) onto existing projects
pub mod features;

/// Thin wrappers over libgit2 for repository init and global config lookup
pub mod git;

/// Project and package name validation and normalization
pub mod naming;

/// Adding libs/ and apps/ members to an existing monorepo
pub mod package;

/// Artifact planning
/// Pure construction of the file set a command will create, separate from
/// the filesystem writes that realize it
pub mod plan;

/// Full project generation orchestration
pub mod project;

/// User input and interaction handling
pub mod prompt;

/// The pymono.toml scaffolding record
/// Persists generation-time choices so `pymono add` understands the layout
pub mod record;

/// Template rendering over the embedded template tree
pub mod renderer;

/// Best-effort `uv sync` after generation
pub mod sync;
