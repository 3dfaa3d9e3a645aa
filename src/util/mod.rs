//! Shared utilities

pub mod fs;
pub mod hash;
pub mod process;

pub use fs::{copy_files, CopyError};
