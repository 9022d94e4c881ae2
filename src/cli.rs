//! Command-line interface implementation for pymono.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for pymono.
///
/// Invoked without a subcommand the tool enters the interactive builder.
#[derive(Parser, Debug)]
#[command(
    name = "pymono",
    version,
    propagate_version = true,
    about = "pymono: scaffolding for uv-based Python monorepos",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    New(NewArgs),

    /// Add packages or features to an existing project
    Add(AddArgs),
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project name (hyphens or underscores, e.g. my-project)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Generate a uv-workspace monorepo with libs/ and apps/ (the default)
    #[arg(short = 'm', long, conflicts_with = "single")]
    pub monorepo: bool,

    /// Generate a conventional single package with a src/ layout
    #[arg(short = 's', long)]
    pub single: bool,

    /// Short project description
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub description: String,

    /// Python version for the generated project
    #[arg(short, long, value_name = "VERSION", default_value = "3.13")]
    pub python: String,

    /// License for the generated project
    #[arg(short, long, value_name = "LICENSE", default_value = "MIT")]
    pub license: String,

    /// Include the sample greeter/printer packages (monorepo only)
    #[arg(long)]
    pub with_samples: bool,

    /// Include Docker packaging (Dockerfile, compose, bake)
    #[arg(long)]
    pub with_docker: bool,

    /// Include a GitHub Actions PR workflow
    #[arg(long)]
    pub with_ci: bool,

    /// Include a PyPI release workflow (pairs with --with-ci)
    #[arg(long)]
    pub with_pypi: bool,

    /// Include mkdocs documentation
    #[arg(long)]
    pub with_docs: bool,

    /// Documentation theme
    #[arg(long, value_name = "THEME", default_value = "material")]
    pub docs_theme: String,

    /// Skip git repository initialization
    #[arg(long)]
    pub no_git: bool,

    /// Skip running 'uv sync' after generation
    #[arg(long)]
    pub no_sync: bool,

    /// Write into an existing, non-empty output directory
    #[arg(short, long)]
    pub force: bool,

    /// Parent directory for the generated project
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip the confirmation step
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(subcommand)]
    pub command: Option<AddCommands>,
}

#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Add a shared library package under libs/
    Lib(PackageArgs),

    /// Add an application package under apps/
    App(AppArgs),

    /// Enable Docker packaging for this project
    Docker,

    /// Enable the GitHub Actions PR workflow
    Ci,

    /// Enable the PyPI release workflow
    Pypi,

    /// Enable mkdocs documentation
    Docs(DocsArgs),
}

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Package name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Short package description
    #[arg(short, long, value_name = "TEXT")]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct AppArgs {
    /// Package name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Short package description
    #[arg(short, long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Include a Dockerfile for this application
    #[arg(long)]
    pub with_docker: bool,
}

#[derive(Args, Debug)]
pub struct DocsArgs {
    /// Documentation theme
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,
}

/// Parses command line arguments and returns the Cli structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Cli::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
