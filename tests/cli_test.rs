use clap::Parser;
use predicates::prelude::*;
use pymono::cli::{AddCommands, Cli, Commands};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("pymono")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_new_defaults() {
    let args = make_args(&["new", "my-project"]);
    let parsed = Cli::try_parse_from(args).unwrap();

    let args = match parsed.command {
        Some(Commands::New(args)) => args,
        _ => panic!("expected the new subcommand"),
    };
    assert_eq!(args.name, "my-project");
    assert!(!args.monorepo);
    assert!(!args.single);
    assert_eq!(args.python, "3.13");
    assert_eq!(args.license, "MIT");
    assert_eq!(args.docs_theme, "material");
    assert_eq!(args.output_dir, PathBuf::from("."));
    assert!(!args.with_samples);
    assert!(!args.no_git);
    assert!(!args.force);
    assert!(!args.yes);
}

#[test]
fn test_new_all_flags() {
    let args = make_args(&[
        "new",
        "my-project",
        "--single",
        "-d",
        "A demo",
        "-p",
        "3.12",
        "-l",
        "Apache-2.0",
        "--with-docker",
        "--with-ci",
        "--with-pypi",
        "--with-docs",
        "--docs-theme",
        "shadcn",
        "--no-git",
        "--no-sync",
        "-f",
        "-o",
        "/tmp/projects",
        "-y",
    ]);
    let parsed = Cli::try_parse_from(args).unwrap();

    let args = match parsed.command {
        Some(Commands::New(args)) => args,
        _ => panic!("expected the new subcommand"),
    };
    assert!(args.single);
    assert_eq!(args.description, "A demo");
    assert_eq!(args.python, "3.12");
    assert_eq!(args.license, "Apache-2.0");
    assert!(args.with_docker && args.with_ci && args.with_pypi && args.with_docs);
    assert_eq!(args.docs_theme, "shadcn");
    assert!(args.no_git && args.no_sync && args.force && args.yes);
    assert_eq!(args.output_dir, PathBuf::from("/tmp/projects"));
}

#[test]
fn test_structure_flags_conflict() {
    let args = make_args(&["new", "my-project", "--monorepo", "--single"]);
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn test_new_requires_a_name() {
    let args = make_args(&["new"]);
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn test_verbose_is_global() {
    let args = make_args(&["new", "my-project", "--verbose"]);
    let parsed = Cli::try_parse_from(args).unwrap();
    assert!(parsed.verbose);
}

#[test]
fn test_version_is_propagated_to_subcommands() {
    let err = Cli::try_parse_from(make_args(&["new", "--version"])).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

    let err = Cli::try_parse_from(make_args(&["add", "lib", "--version"])).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_add_subcommands() {
    let parsed = Cli::try_parse_from(make_args(&["add", "lib", "util"])).unwrap();
    match parsed.command {
        Some(Commands::Add(add)) => match add.command {
            Some(AddCommands::Lib(args)) => {
                assert_eq!(args.name, "util");
                assert_eq!(args.description, None);
            }
            _ => panic!("expected add lib"),
        },
        _ => panic!("expected the add subcommand"),
    }

    let parsed =
        Cli::try_parse_from(make_args(&["add", "app", "worker", "--with-docker"])).unwrap();
    match parsed.command {
        Some(Commands::Add(add)) => match add.command {
            Some(AddCommands::App(args)) => {
                assert_eq!(args.name, "worker");
                assert!(args.with_docker);
            }
            _ => panic!("expected add app"),
        },
        _ => panic!("expected the add subcommand"),
    }

    let parsed = Cli::try_parse_from(make_args(&["add", "docs", "--theme", "shadcn"])).unwrap();
    match parsed.command {
        Some(Commands::Add(add)) => match add.command {
            Some(AddCommands::Docs(args)) => assert_eq!(args.theme.as_deref(), Some("shadcn")),
            _ => panic!("expected add docs"),
        },
        _ => panic!("expected the add subcommand"),
    }
}

#[test]
fn test_bare_add_parses() {
    let parsed = Cli::try_parse_from(make_args(&["add"])).unwrap();
    match parsed.command {
        Some(Commands::Add(add)) => assert!(add.command.is_none()),
        _ => panic!("expected the add subcommand"),
    }
}

// End-to-end runs of the compiled binary.

fn pymono() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("pymono").unwrap()
}

fn contains(needle: &str) -> predicates::str::ContainsPredicate {
    predicates::str::contains(needle)
}

#[test]
fn test_version_flag() {
    pymono().arg("--version").assert().success().stdout(contains("pymono"));
}

#[test]
fn test_version_flag_on_subcommand() {
    pymono().args(["new", "--version"]).assert().success().stdout(contains("pymono"));
}

#[test]
fn test_help_mentions_subcommands() {
    pymono()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("new").and(contains("add")));
}

#[test]
fn test_new_without_name_prints_help() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .arg("new")
        .assert()
        .failure()
        .code(1)
        .stdout(contains("Usage"));
}

#[test]
fn test_new_rejects_keyword_name() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["new", "class", "--yes", "--no-git", "--no-sync"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("reserved keyword"));
    assert!(!tmp.path().join("class").exists());
}

#[test]
fn test_new_generates_monorepo() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args([
            "new",
            "acme-data",
            "--with-samples",
            "--with-ci",
            "--yes",
            "--no-git",
            "--no-sync",
        ])
        .assert()
        .success()
        .stdout(contains("Created monorepo project 'acme-data'"));

    let root = tmp.path().join("acme-data");
    assert!(root.join("pymono.toml").exists());
    assert!(root.join("pyproject.toml").exists());
    assert!(root.join("libs/greeter/pyproject.toml").exists());
    assert!(root.join("apps/printer/pyproject.toml").exists());
    assert_eq!(fs::read_to_string(root.join(".python-version")).unwrap(), "3.13\n");

    let workflow = fs::read_to_string(root.join(".github/workflows/pr.yml")).unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(&workflow).unwrap();
    assert!(parsed.get("jobs").is_some());
}

#[test]
fn test_new_rejects_unknown_python() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["new", "demo", "-p", "2.7", "--yes", "--no-git", "--no-sync"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Unsupported python version '2.7'"));
}

#[test]
fn test_add_outside_a_project_fails() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["add", "ci"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("No pymono.toml found"));
}

#[test]
fn test_add_ci_is_idempotent() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["new", "demo", "--yes", "--no-git", "--no-sync"])
        .assert()
        .success();
    let root = tmp.path().join("demo");

    pymono()
        .current_dir(&root)
        .args(["add", "ci"])
        .assert()
        .success()
        .stdout(contains("Enabled CI"));
    assert!(root.join(".github/workflows/pr.yml").exists());

    pymono()
        .current_dir(&root)
        .args(["add", "ci"])
        .assert()
        .success()
        .stdout(contains("already enabled"));
}

#[test]
fn test_add_lib_then_duplicate() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["new", "demo", "--yes", "--no-git", "--no-sync"])
        .assert()
        .success();
    let root = tmp.path().join("demo");

    pymono()
        .current_dir(&root)
        .args(["add", "lib", "util"])
        .assert()
        .success()
        .stdout(contains("Added library 'util'").and(contains("uv sync --all-packages")));
    assert!(root.join("libs/util/pyproject.toml").exists());
    assert!(root.join("libs/util/demo/util/__init__.py").exists());
    assert!(root.join("libs/util/demo/py.typed").exists());

    pymono()
        .current_dir(&root)
        .args(["add", "lib", "util"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("already exists"));
}

#[test]
fn test_add_app_rejected_on_single_layout() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["new", "demo", "--single", "--yes", "--no-git", "--no-sync"])
        .assert()
        .success();

    pymono()
        .current_dir(tmp.path().join("demo"))
        .args(["add", "app", "worker"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("single-package layout"));
}

#[test]
fn test_add_docker_without_apps_skips_compose() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["new", "demo", "--yes", "--no-git", "--no-sync"])
        .assert()
        .success();
    let root = tmp.path().join("demo");

    pymono()
        .current_dir(&root)
        .args(["add", "docker"])
        .assert()
        .success()
        .stdout(contains("No applications with a Dockerfile"));
    assert!(root.join(".dockerignore").exists());
    assert!(!root.join("docker-compose.yml").exists());
}

#[test]
fn test_add_app_with_docker_then_docker_feature() {
    let tmp = tempdir().unwrap();
    pymono()
        .current_dir(tmp.path())
        .args(["new", "demo", "--yes", "--no-git", "--no-sync"])
        .assert()
        .success();
    let root = tmp.path().join("demo");

    pymono()
        .current_dir(&root)
        .args(["add", "app", "worker", "--with-docker"])
        .assert()
        .success();
    assert!(root.join("apps/worker/Dockerfile").exists());

    pymono()
        .current_dir(&root)
        .args(["add", "docker"])
        .assert()
        .success()
        .stdout(contains("Enabled Docker support"));
    let compose = fs::read_to_string(root.join("docker-compose.yml")).unwrap();
    assert!(compose.contains("worker:"));
    assert!(compose.contains("apps/worker/Dockerfile"));
}

#[test]
#[cfg(unix)]
fn test_new_captures_sync_output_and_warns_with_stderr() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempdir().unwrap();
    let bin_dir = tmp.path().join("bin");
    fs::create_dir_all(&bin_dir).unwrap();
    let stub = bin_dir.join("uv");
    fs::write(&stub, "#!/bin/sh\necho resolving-packages\necho 'No solution found' >&2\nexit 1\n")
        .unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let work = tmp.path().join("work");
    fs::create_dir_all(&work).unwrap();
    let path = format!("{}:{}", bin_dir.display(), std::env::var("PATH").unwrap());

    pymono()
        .current_dir(&work)
        .env("PATH", path)
        .args(["new", "demo", "--yes", "--no-git"])
        .assert()
        .success()
        .stdout(contains("resolving-packages").not())
        .stderr(contains("'uv sync' exited with").and(contains("No solution found")));
}
