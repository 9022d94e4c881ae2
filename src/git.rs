//! Version-control collaborator. Repository init is best-effort; callers
//! downgrade failures to warnings because the scaffolded tree is already
//! complete at that point.

use std::path::Path;

/// Initializes a fresh git repository at `root`.
pub fn init_repository(root: &Path) -> Result<(), git2::Error> {
    git2::Repository::init(root).map(|_| ())
}

/// Reads a key from the user's global git configuration, used to prefill
/// authorship metadata.
pub fn global_config_value(key: &str) -> Option<String> {
    let config = git2::Config::open_default().ok()?;
    config.get_string(key).ok()
}
