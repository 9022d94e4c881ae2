//! Template resolution and rendering.
//!
//! The whole template tree ships inside the binary. Logical template keys
//! (paths relative to `templates/`) are resolved by a loader over the
//! embedded assets and rendered through MiniJinja. The environment mirrors
//! the settings the generated files depend on: blocks own their lines and
//! trailing newlines survive.

use crate::error::{Error, Result};
use minijinja::Environment;
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateAssets;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders the embedded template `template` with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;

    /// Copies an embedded resource to `dest` byte for byte, without
    /// template processing.
    fn copy_static(&self, template: &str, dest: &Path) -> Result<()>;

    /// Renders a template and writes the result to `dest`, creating parent
    /// directories as needed.
    fn render_to_file(
        &self,
        template: &str,
        dest: &Path,
        context: &serde_json::Value,
    ) -> Result<()> {
        let content = self.render(template, context)?;
        write_output(dest, content.as_bytes())
    }
}

/// MiniJinja-based template rendering engine over the embedded tree.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| match TemplateAssets::get(name) {
            Some(asset) => match String::from_utf8(asset.data.into_owned()) {
                Ok(source) => Ok(Some(source)),
                Err(err) => Err(minijinja::Error::new(
                    minijinja::ErrorKind::InvalidOperation,
                    format!("embedded template '{}' is not valid UTF-8: {}", name, err),
                )),
            },
            None => Ok(None),
        });
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders an embedded template using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateNotFoundError` if the key resolves to nothing in
    ///   the embedded tree
    /// * `Error::MinijinjaError` for syntax or rendering failures
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let tmpl = self.env.get_template(template).map_err(|err| {
            if err.kind() == minijinja::ErrorKind::TemplateNotFound {
                Error::TemplateNotFoundError { template: template.to_string() }
            } else {
                Error::MinijinjaError(err)
            }
        })?;
        tmpl.render(context).map_err(Error::MinijinjaError)
    }

    fn copy_static(&self, template: &str, dest: &Path) -> Result<()> {
        let asset = TemplateAssets::get(template).ok_or_else(|| Error::TemplateNotFoundError {
            template: template.to_string(),
        })?;
        write_output(dest, asset.data.as_ref())
    }
}

fn write_output(dest: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::write(dest, content).map_err(Error::IoError)
}
