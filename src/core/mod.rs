//! Core data structures for pkgsmith.
//!
//! This module contains the types a template run is assembled from:
//! - The `package.json` manifest and its identity fields
//! - Dependency sets and module definitions
//! - Template specs (presets or `template.toml`) and the built template
//! - The copy manifest for `.template/` boilerplate

pub mod bundle;
pub mod copy_manifest;
pub mod dependency;
pub mod manifest;
pub mod presets;
pub mod spec;
pub mod template;

pub use bundle::{AuxiliaryModule, Bundles, MainModule};
pub use copy_manifest::{CopyManifest, TEMPLATE_DIR};
pub use dependency::{Dependencies, DependencySet, RunTimeDeps};
pub use manifest::{read_manifest, ManifestError, PackageManifest, MANIFEST_NAME};
pub use spec::{GeneratorConfig, SpecError, TemplateSpec, SPEC_FILE};
pub use template::{PackageType, Template, TemplateError};
