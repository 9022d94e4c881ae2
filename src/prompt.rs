//! Interactive configuration builder.
//!
//! Prompting is a collaborator of its own: it produces a fully-formed
//! [`ProjectConfig`] (or a package request) and hands it to the engine,
//! which never prompts. The [`Prompter`] trait keeps the flows testable
//! without a terminal.

use crate::config::{
    DocsTheme, LicenseType, ProjectConfig, ProjectStructure, PythonVersion,
};
use crate::error::{Error, Result};
use crate::git;
use crate::naming;
use crate::package::PackageKind;
use dialoguer::{Confirm, FuzzySelect, Input};

/// Terminal interaction surface used by the builder flows.
pub trait Prompter {
    fn input(&self, prompt: &str, default: Option<String>) -> Result<String>;
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;
}

/// Dialoguer-backed prompter used by the real CLI.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        DialoguerPrompter
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<String>) -> Result<String> {
        let result = match default {
            Some(default) => {
                Input::new().with_prompt(prompt).default(default).interact_text()
            }
            None => Input::new().with_prompt(prompt).interact_text(),
        };
        result.map_err(|e| Error::ConfigError(e.to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        FuzzySelect::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}

const STRUCTURE_ITEMS: [&str; 2] = ["monorepo (libs/ + apps/)", "single package (src/ layout)"];
const PYTHON_ITEMS: [&str; 3] = ["3.13", "3.12", "3.11"];
const LICENSE_ITEMS: [&str; 4] = ["MIT", "Apache-2.0", "GPL-3.0", "none"];
const THEME_ITEMS: [&str; 2] = ["material", "shadcn"];

/// Walks the user through every scaffolding choice and returns a complete
/// config. Declining the final confirmation cancels the operation with
/// nothing created.
pub fn build_project_config(
    prompter: &dyn Prompter,
    initial_name: Option<String>,
) -> Result<ProjectConfig> {
    let raw_name = prompt_valid_name(prompter, initial_name, "Project name")?;
    let mut config = ProjectConfig::new(&raw_name);

    config.description = prompter.input("Short description", Some(String::new()))?;

    let structure = prompter.select("Project structure", &STRUCTURE_ITEMS, 0)?;
    config.structure = if structure == 0 {
        ProjectStructure::Monorepo
    } else {
        ProjectStructure::Single
    };
    config.python_version =
        PythonVersion::parse(PYTHON_ITEMS[prompter.select("Python version", &PYTHON_ITEMS, 0)?])?;
    config.license =
        LicenseType::parse(LICENSE_ITEMS[prompter.select("License", &LICENSE_ITEMS, 0)?])?;

    config.with_samples = config.structure == ProjectStructure::Monorepo
        && prompter.confirm("Include sample packages (greeter + printer)?", true)?;
    config.with_docker = prompter.confirm("Add Docker packaging?", false)?;
    config.with_ci = prompter.confirm("Add a GitHub Actions PR workflow?", true)?;
    config.with_pypi =
        config.with_ci && prompter.confirm("Add a PyPI release workflow?", false)?;
    if prompter.confirm("Add mkdocs documentation?", false)? {
        config.with_docs = true;
        config.docs_theme =
            DocsTheme::parse(THEME_ITEMS[prompter.select("Docs theme", &THEME_ITEMS, 0)?])?;
    }
    config.with_precommit = prompter.confirm("Add pre-commit hooks?", true)?;

    config.author_name =
        prompter.input("Author name", Some(git::global_config_value("user.name").unwrap_or_default()))?;
    config.author_email = prompter
        .input("Author email", Some(git::global_config_value("user.email").unwrap_or_default()))?;
    config.github_owner = prompter.input("GitHub owner (user or org)", Some(String::new()))?;

    println!();
    println!("Project: {} ({}, Python {})", config.slug, config.structure, config.python_version);
    println!("License: {}", config.license);
    if !prompter.confirm(&format!("Create './{}'?", config.slug), true)? {
        return Err(Error::Cancelled);
    }
    Ok(config)
}

/// Small interactive flow behind a bare `pymono add`.
pub fn build_package_request(
    prompter: &dyn Prompter,
) -> Result<(PackageKind, String, Option<String>, bool)> {
    let kind = match prompter.select(
        "Package kind",
        &["lib (shared library)", "app (deployable application)"],
        0,
    )? {
        0 => PackageKind::Lib,
        _ => PackageKind::App,
    };
    let name = prompt_valid_name(prompter, None, "Package name")?;
    let description = prompter.input("Short description", Some(String::new()))?;
    let with_docker =
        kind == PackageKind::App && prompter.confirm("Include a Dockerfile?", false)?;

    let description = if description.is_empty() { None } else { Some(description) };
    Ok((kind, name, description, with_docker))
}

/// Asks for a name until it passes validation, echoing each rejection
/// reason. A preset name is validated once and failures are fatal.
fn prompt_valid_name(
    prompter: &dyn Prompter,
    initial_name: Option<String>,
    label: &str,
) -> Result<String> {
    if let Some(name) = initial_name {
        naming::validate_name(&name)?;
        return Ok(name);
    }
    loop {
        let name = prompter.input(label, None)?;
        match naming::validate_name(&name) {
            Ok(()) => return Ok(name),
            Err(err) => println!("{}", err),
        }
    }
}
