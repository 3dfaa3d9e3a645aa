//! High-level operations.
//!
//! This module contains the implementation of pkgsmith commands.

pub mod check;
pub mod generate;

pub use check::{check, CheckReport, FileCheck, FileStatus};
pub use generate::{generate, GenerateReport, PipelineError};
