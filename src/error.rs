//! Error handling for the pymono application.
//! Defines the error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Errors that can occur while scaffolding or growing a project.
///
/// Soft conditions are deliberately not represented here: re-enabling a
/// feature that is already on is a no-op reported on stdout, and failures of
/// the git/uv collaborators degrade to warnings at the call site.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the template engine
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// A logical template key resolved to nothing in the embedded tree.
    /// This indicates a packaging defect, not a user mistake.
    #[error("Template '{template}' is not bundled with this binary.")]
    TemplateNotFoundError { template: String },

    /// A project or package name failed the validation rule chain
    #[error("{reason}.")]
    InvalidNameError { reason: String },

    /// A string option did not map to any closed enum value
    #[error("Unsupported {field} '{value}' (expected one of: {expected}).")]
    UnsupportedValueError { field: String, value: String, expected: String },

    #[error("Output directory '{output_dir}' already exists and is not empty. Use --force to write into it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("No pymono.toml found in '{start_dir}' or any parent directory. Run this command inside a pymono project.")]
    ProjectNotFoundError { start_dir: String },

    #[error("Package directory '{package_dir}' already exists and is not empty.")]
    PackageExistsError { package_dir: String },

    /// `add lib` / `add app` require the monorepo layout
    #[error("This project uses the single-package layout and cannot host workspace packages.")]
    SinglePackageLayoutError,

    /// Represents errors that occur during configuration handling,
    /// including failed interactive prompts
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The scaffolding record or a manifest could not be parsed
    #[error("TOML parse error: {0}.")]
    TomlParseError(#[from] toml::de::Error),

    /// The scaffolding record could not be serialized
    #[error("TOML serialize error: {0}.")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// The user declined the confirmation step
    #[error("Operation cancelled.")]
    Cancelled,
}

/// Convenience type alias for Results with pymono's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
