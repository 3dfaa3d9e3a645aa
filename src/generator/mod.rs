//! Template generators.
//!
//! A generator takes a built [`Template`] and materializes the package's
//! tooling files on disk. The pipeline treats it as a black box: it only
//! needs the call to succeed before copying from `.template/`.

pub mod builtin;
pub mod command;
pub mod files;
pub mod stub;

use std::error::Error as StdError;

use thiserror::Error;

use crate::core::{GeneratorConfig, Template};

pub use builtin::BuiltinGenerator;
pub use command::CommandGenerator;

/// Opaque failure reported by a generator.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GeneratorError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl GeneratorError {
    pub fn new(message: impl Into<String>) -> Self {
        GeneratorError {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        GeneratorError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Materializes the files described by a template.
pub trait GenerateTemplate {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn generate(&self, template: &Template) -> Result<(), GeneratorError>;
}

/// Instantiate the generator a spec asks for.
pub fn from_config(config: &GeneratorConfig) -> Box<dyn GenerateTemplate> {
    match config {
        GeneratorConfig::Builtin => Box::new(BuiltinGenerator::new()),
        GeneratorConfig::Command { program, args } => {
            Box::new(CommandGenerator::new(program.clone()).args(args.iter().cloned()))
        }
    }
}
