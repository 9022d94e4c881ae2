//! pymono's main application entry point and orchestration logic.
//! Handles command-line argument parsing, dispatches subcommands and
//! coordinates interactions between different modules.

use pymono::{
    cli::{get_args, AddCommands, Cli, Commands, NewArgs},
    config::{DocsTheme, LicenseType, ProjectConfig, ProjectStructure, PythonVersion},
    error::{default_error_handler, Error, Result},
    features, git, naming,
    package::{add_package, PackageKind},
    project::generate_project,
    prompt::{build_package_request, build_project_config, DialoguerPrompter, Prompter},
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let cli = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(cli) {
        default_error_handler(err);
    }
}

/// Dispatches the parsed command line.
///
/// # Flow
/// * `pymono` - interactive project builder in the current directory
/// * `pymono new NAME` - flag-driven project generation
/// * `pymono add ...` - packages and features for an existing project
fn run(cli: Cli) -> Result<()> {
    let renderer = MiniJinjaRenderer::new();

    match cli.command {
        None => {
            let prompter = DialoguerPrompter::new();
            let config = build_project_config(&prompter, None)?;
            let output_dir =
                std::env::current_dir().map_err(Error::IoError)?.join(&config.slug);
            generate_project(&config, &output_dir, &renderer, false)
        }
        Some(Commands::New(args)) => run_new(args, &renderer),
        Some(Commands::Add(add)) => match add.command {
            None => {
                let prompter = DialoguerPrompter::new();
                let (kind, name, description, with_docker) =
                    build_package_request(&prompter)?;
                add_package(kind, &name, description, with_docker, &renderer)
            }
            Some(AddCommands::Lib(args)) => {
                add_package(PackageKind::Lib, &args.name, args.description, false, &renderer)
            }
            Some(AddCommands::App(args)) => add_package(
                PackageKind::App,
                &args.name,
                args.description,
                args.with_docker,
                &renderer,
            ),
            Some(AddCommands::Docker) => features::add_docker(&renderer),
            Some(AddCommands::Ci) => features::add_ci(&renderer),
            Some(AddCommands::Pypi) => features::add_pypi(&renderer),
            Some(AddCommands::Docs(args)) => {
                let theme = match args.theme {
                    Some(raw) => Some(DocsTheme::parse(&raw)?),
                    None => None,
                };
                features::add_docs(theme, &renderer)
            }
        },
    }
}

/// Builds a [`ProjectConfig`] from `pymono new` flags and generates the
/// project under `<output-dir>/<slug>`.
fn run_new(args: NewArgs, renderer: &MiniJinjaRenderer) -> Result<()> {
    naming::validate_name(&args.name)?;
    let mut config = ProjectConfig::new(&args.name);

    config.description = args.description;
    config.structure = if args.single {
        ProjectStructure::Single
    } else {
        ProjectStructure::Monorepo
    };
    config.python_version = PythonVersion::parse(&args.python)?;
    config.license = LicenseType::parse(&args.license)?;
    config.with_samples = args.with_samples;
    config.with_docker = args.with_docker;
    config.with_ci = args.with_ci;
    config.with_pypi = args.with_pypi;
    config.with_docs = args.with_docs;
    config.docs_theme = DocsTheme::parse(&args.docs_theme)?;
    config.init_git = !args.no_git;
    config.auto_sync = !args.no_sync;
    config.author_name = git::global_config_value("user.name").unwrap_or_default();
    config.author_email = git::global_config_value("user.email").unwrap_or_default();

    if config.with_samples && config.structure == ProjectStructure::Single {
        log::warn!("Sample packages are only generated for monorepos; ignoring --with-samples.");
        config.with_samples = false;
    }

    let output_dir = args.output_dir.join(&config.slug);

    if !args.yes {
        println!(
            "Project: {} ({}, Python {})",
            config.slug, config.structure, config.python_version
        );
        println!("License: {}", config.license);
        println!("Target:  {}", output_dir.display());
        let prompter = DialoguerPrompter::new();
        if !prompter.confirm("Continue?", true)? {
            return Err(Error::Cancelled);
        }
    }

    generate_project(&config, &output_dir, renderer, args.force)
}
