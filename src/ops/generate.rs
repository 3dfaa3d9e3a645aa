//! Implementation of `pkgsmith generate`.
//!
//! One linear pass: read `package.json`, build the template, run the
//! generator, then copy the boilerplate from `.template/` into the package
//! root. Any failure aborts the run; nothing is rolled back.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{
    read_manifest, CopyManifest, ManifestError, Template, TemplateError, TemplateSpec,
    MANIFEST_NAME,
};
use crate::generator::{GenerateTemplate, GeneratorError};
use crate::util::fs::copy_files;
use crate::util::CopyError;

/// Error from a generate run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load package manifest")]
    Manifest(#[from] ManifestError),

    #[error("invalid template configuration")]
    Template(#[from] TemplateError),

    #[error("template generation failed")]
    Generator(#[from] GeneratorError),

    #[error("failed to copy template files")]
    Copy(#[from] CopyError),
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct GenerateReport {
    /// The configuration handed to the generator
    pub template: Template,

    /// Destination paths written by the copy step, in order
    pub copied: Vec<PathBuf>,

    /// Non-fatal template validation findings
    pub warnings: Vec<String>,
}

/// Run the full pipeline for the package at `root`.
pub fn generate(
    root: &Path,
    spec: &TemplateSpec,
    generator: &dyn GenerateTemplate,
) -> Result<GenerateReport, PipelineError> {
    let manifest_path = root.join(MANIFEST_NAME);
    tracing::debug!("reading {}", manifest_path.display());
    let manifest = read_manifest(&manifest_path)?;

    let template = Template::build(root, &manifest, spec)?;
    let warnings = template.validate()?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    tracing::info!(
        "configured {} {} ({})",
        template.name,
        template.version,
        template.kind.as_str()
    );

    tracing::info!("running generator `{}`", generator.name());
    generator.generate(&template)?;

    let entries = spec.copy.entries();
    let copied = copy_files(&CopyManifest::source_dir(root), root, &entries)?;
    tracing::info!("copied {} template files", copied.len());

    Ok(GenerateReport {
        template,
        copied,
        warnings,
    })
}
