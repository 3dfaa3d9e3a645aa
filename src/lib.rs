//! pkgsmith - template scaffolding for front-end library packages
//!
//! This crate reads a package's `package.json`, assembles a template
//! configuration from a spec, runs a generator over it and copies the
//! resulting boilerplate from `.template/` into the package root.

pub mod core;
pub mod generator;
pub mod ops;
pub mod util;

/// Test utilities for pkgsmith unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides fixtures for package roots and a recording
/// generator double.
#[cfg(test)]
pub mod test_support;

pub use core::{
    manifest::PackageManifest, spec::TemplateSpec, template::Template, CopyManifest,
    Dependencies,
};

pub use generator::{GenerateTemplate, GeneratorError};
pub use ops::{generate, GenerateReport, PipelineError};
