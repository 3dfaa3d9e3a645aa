//! Test utilities for pkgsmith unit tests.
//!
//! Provides filesystem fixtures and a generator double that records calls
//! instead of writing files.
//!
//! # Example
//!
//! ```rust,ignore
//! use pkgsmith::test_support::{fixtures::write_package, RecordingGenerator};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     write_package(tmp.path(), "pkg", "1.0.0");
//!
//!     let generator = RecordingGenerator::failing("boom");
//!     // Run the pipeline with the double...
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;

use crate::core::Template;
use crate::generator::{GenerateTemplate, GeneratorError};

/// Generator that records the package names it was called with.
#[derive(Debug, Default)]
pub struct RecordingGenerator {
    calls: RefCell<Vec<String>>,
    fail_with: Option<String>,
}

impl RecordingGenerator {
    /// A generator that records the call, then fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        RecordingGenerator {
            calls: RefCell::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Package names seen so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl GenerateTemplate for RecordingGenerator {
    fn name(&self) -> &str {
        "recording"
    }

    fn generate(&self, template: &Template) -> Result<(), GeneratorError> {
        self.calls.borrow_mut().push(template.name.clone());
        match &self.fail_with {
            Some(message) => Err(GeneratorError::new(message.clone())),
            None => Ok(()),
        }
    }
}
