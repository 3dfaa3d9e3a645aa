//! The fixed list of files copied from the template directory.

use std::path::{Path, PathBuf};

/// Directory, relative to the package root, the generator writes into.
pub const TEMPLATE_DIR: &str = ".template";

/// Generated source stub copied into `src/`.
pub const DEFAULT_STUB: &str = "src/auto-generated.ts";

/// Files copied when a spec does not list its own.
pub const DEFAULT_FILES: &[&str] = &[
    "README.md",
    ".gitignore",
    ".npmignore",
    ".prettierignore",
    "LICENSE",
    "package.json",
    "tsconfig.json",
    "jest.config.ts",
    "webpack.config.ts",
];

/// Relative file names copied verbatim from `.template/` into the package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyManifest {
    /// Boilerplate files, copied after the stub
    pub files: Vec<String>,

    /// Generated source stub, copied first
    pub stub: Option<String>,
}

impl Default for CopyManifest {
    fn default() -> Self {
        CopyManifest::new(DEFAULT_FILES.iter().copied())
    }
}

impl CopyManifest {
    /// Manifest with the given files and the default stub.
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CopyManifest {
            files: files.into_iter().map(Into::into).collect(),
            stub: Some(DEFAULT_STUB.to_string()),
        }
    }

    /// Drop the stub copy.
    pub fn without_stub(mut self) -> Self {
        self.stub = None;
        self
    }

    /// Relative paths in copy order: the stub, then `files` as listed.
    pub fn entries(&self) -> Vec<PathBuf> {
        self.stub
            .iter()
            .chain(self.files.iter())
            .map(PathBuf::from)
            .collect()
    }

    /// The template directory under `root`.
    pub fn source_dir(root: &Path) -> PathBuf {
        root.join(TEMPLATE_DIR)
    }
}
