//! The generator shipped with pkgsmith.
//!
//! Renders the full boilerplate set into `<root>/.template/`. Files whose
//! content would not change are left untouched, so repeated runs keep
//! modification times stable.

use std::path::PathBuf;

use super::{files, GenerateTemplate, GeneratorError};
use crate::core::{Template, TEMPLATE_DIR};
use crate::util::fs::write_if_changed;

/// Renders `.template/` from a [`Template`].
#[derive(Debug, Clone, Default)]
pub struct BuiltinGenerator {
    out_dir: Option<PathBuf>,
}

impl BuiltinGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write somewhere other than `<root>/.template`.
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    fn out_dir(&self, template: &Template) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| template.path.join(TEMPLATE_DIR))
    }
}

impl GenerateTemplate for BuiltinGenerator {
    fn name(&self) -> &str {
        "builtin"
    }

    fn generate(&self, template: &Template) -> Result<(), GeneratorError> {
        let out_dir = self.out_dir(template);
        let rendered = files::render_all(template)?;

        let mut written = 0;
        for (relative, contents) in &rendered {
            let path = out_dir.join(relative);
            let changed = write_if_changed(&path, contents.as_bytes()).map_err(|e| {
                GeneratorError::with_source(format!("failed to write {}", path.display()), e)
            })?;
            if changed {
                written += 1;
                tracing::debug!("rendered {}", relative.display());
            }
        }

        tracing::info!(
            "rendered {} of {} template files into {}",
            written,
            rendered.len(),
            out_dir.display()
        );
        Ok(())
    }
}
