//! Dependency-sync collaborator. Runs `uv sync` with captured output in the
//! generated project so the workspace is usable immediately. Like git init
//! this never fails the surrounding operation; a failing sync surfaces its
//! stderr as a warning and a missing `uv` binary gets its own message.

use crate::config::ProjectStructure;
use std::io;
use std::path::Path;
use std::process::Command;

pub fn run_sync(root: &Path, structure: ProjectStructure) {
    let mut command = Command::new("uv");
    command.arg("sync");
    if structure == ProjectStructure::Monorepo {
        command.arg("--all-packages");
    }
    command.current_dir(root);

    println!("Syncing dependencies with uv...");
    match command.output() {
        Ok(output) if output.status.success() => {}
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                log::warn!("'uv sync' exited with {}; run it manually.", output.status);
            } else {
                log::warn!("'uv sync' exited with {}: {}", output.status, stderr);
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("uv not found; run 'uv sync' manually once it is installed.");
        }
        Err(err) => log::warn!("Could not run 'uv sync': {}.", err),
    }
}
