//! Validation and normalization of project and package names.
//!
//! Names arrive in hyphen, underscore or camelCase form and must map onto a
//! legal Python package identifier. Validation applies an ordered rule chain
//! and reports the first failing rule so the user always gets one concrete,
//! actionable reason.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Python 3 keywords. The identifier form of a name must not shadow one.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
    "return", "try", "while", "with", "yield",
];

/// Names that collide with generated layouts or Python module machinery.
pub const RESERVED_NAMES: &[&str] = &[
    "__init__", "__main__", "__pycache__", "__all__", "__builtins__", "__doc__",
    "__file__", "__name__", "__package__", "__spec__", "test", "tests", "src", "lib",
    "libs", "app", "apps", "dist", "build",
];

const MAX_NAME_LENGTH: usize = 100;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_-]*$").unwrap());
static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

/// Converts a name to its Python identifier form: hyphens become
/// underscores, camelCase boundaries gain an underscore, everything is
/// lowercased. Idempotent.
pub fn normalize_identifier(name: &str) -> String {
    let flat = name.replace('-', "_");
    CAMEL_BOUNDARY.replace_all(&flat, "${1}_${2}").to_lowercase()
}

/// Converts a name to its distribution slug form: underscores become
/// hyphens, camelCase boundaries gain a hyphen, everything is lowercased.
/// Idempotent.
pub fn normalize_slug(name: &str) -> String {
    let flat = name.replace('_', "-");
    CAMEL_BOUNDARY.replace_all(&flat, "${1}-${2}").to_lowercase()
}

fn is_python_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates a project or package name against the ordered rule chain.
/// Returns the first failing rule's reason.
pub fn validate_name(name: &str) -> Result<()> {
    let fail = |reason: String| Err(Error::InvalidNameError { reason });

    if name.is_empty() {
        return fail("Name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return fail(format!("Name is too long (max {} characters)", MAX_NAME_LENGTH));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return fail("Name cannot contain path separators or '..'".to_string());
    }
    if name.contains(' ') {
        return fail("Name cannot contain spaces (use hyphens or underscores)".to_string());
    }
    if !NAME_PATTERN.is_match(name) {
        return fail(
            "Name must start with a letter and contain only letters, numbers, hyphens, or underscores"
                .to_string(),
        );
    }

    let identifier = normalize_identifier(name);
    if !is_python_identifier(&identifier) {
        return fail(format!("'{}' is not a valid Python identifier", identifier));
    }
    if PYTHON_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(&identifier)) {
        return fail(format!("'{}' is a Python reserved keyword", name));
    }
    if RESERVED_NAMES.contains(&name) || RESERVED_NAMES.contains(&identifier.as_str()) {
        return fail(format!("'{}' is a reserved name that may cause conflicts", name));
    }

    Ok(())
}
