//! Implementation of `pkgsmith check`.
//!
//! Compares every copy-manifest entry in `.template/` with its counterpart
//! in the package root, without writing anything.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::CopyManifest;
use crate::util::fs::list_files;
use crate::util::hash::sha256_file;

/// State of one copied file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    InSync,
    Differs,
    MissingDestination,
    MissingSource,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::InSync => "in sync",
            FileStatus::Differs => "differs",
            FileStatus::MissingDestination => "not copied",
            FileStatus::MissingSource => "missing from template",
        }
    }
}

/// Status of a single copy-manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    pub path: PathBuf,
    pub status: FileStatus,
}

/// Result of a drift check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// One entry per copy-manifest path, in copy order
    pub files: Vec<FileCheck>,

    /// Files present in `.template/` that the copy manifest does not list
    pub unlisted: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_in_sync(&self) -> bool {
        self.files.iter().all(|f| f.status == FileStatus::InSync)
    }

    pub fn out_of_sync(&self) -> impl Iterator<Item = &FileCheck> {
        self.files.iter().filter(|f| f.status != FileStatus::InSync)
    }
}

/// Check the package at `root` against its template directory.
pub fn check(root: &Path, copy: &CopyManifest) -> Result<CheckReport> {
    let source_dir = CopyManifest::source_dir(root);
    let entries = copy.entries();

    let mut files = Vec::with_capacity(entries.len());
    for entry in &entries {
        let src = source_dir.join(entry);
        let dst = root.join(entry);

        let status = if !src.is_file() {
            FileStatus::MissingSource
        } else if !dst.is_file() {
            FileStatus::MissingDestination
        } else if sha256_file(&src)? == sha256_file(&dst)? {
            FileStatus::InSync
        } else {
            FileStatus::Differs
        };

        tracing::debug!("{}: {}", entry.display(), status.as_str());
        files.push(FileCheck {
            path: entry.clone(),
            status,
        });
    }

    let unlisted = if source_dir.is_dir() {
        list_files(&source_dir)?
            .into_iter()
            .filter(|f| !entries.contains(f))
            .collect()
    } else {
        Vec::new()
    };

    Ok(CheckReport { files, unlisted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::write_template_dir;
    use std::fs;
    use tempfile::TempDir;

    fn status_of(report: &CheckReport, path: &str) -> FileStatus {
        report
            .files
            .iter()
            .find(|f| f.path == Path::new(path))
            .map(|f| f.status)
            .unwrap()
    }

    #[test]
    fn test_check_statuses() {
        let tmp = TempDir::new().unwrap();
        let copy = CopyManifest::new(["README.md", "LICENSE", "package.json"]);
        write_template_dir(tmp.path(), &copy, "t");
        fs::remove_file(tmp.path().join(".template/package.json")).unwrap();
        fs::write(tmp.path().join(".template/extra.txt"), "").unwrap();

        fs::write(tmp.path().join("README.md"), "t: README.md").unwrap();
        fs::write(tmp.path().join("package.json"), "{}").unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/auto-generated.ts"), "edited").unwrap();

        let report = check(tmp.path(), &copy).unwrap();

        assert_eq!(status_of(&report, "README.md"), FileStatus::InSync);
        assert_eq!(status_of(&report, "LICENSE"), FileStatus::MissingDestination);
        assert_eq!(status_of(&report, "package.json"), FileStatus::MissingSource);
        assert_eq!(status_of(&report, "src/auto-generated.ts"), FileStatus::Differs);
        assert_eq!(report.unlisted, vec![PathBuf::from("extra.txt")]);
        assert!(!report.is_in_sync());
        assert_eq!(report.out_of_sync().count(), 3);
    }

    #[test]
    fn test_check_without_template_dir() {
        let tmp = TempDir::new().unwrap();
        let report = check(tmp.path(), &CopyManifest::new(["README.md"])).unwrap();

        assert!(report
            .files
            .iter()
            .all(|f| f.status == FileStatus::MissingSource));
        assert!(report.unlisted.is_empty());
    }

    #[test]
    fn test_check_in_sync_after_copy() {
        let tmp = TempDir::new().unwrap();
        let copy = CopyManifest::new(["README.md"]);
        write_template_dir(tmp.path(), &copy, "t");
        crate::util::copy_files(
            &CopyManifest::source_dir(tmp.path()),
            tmp.path(),
            &copy.entries(),
        )
        .unwrap();

        assert!(check(tmp.path(), &copy).unwrap().is_in_sync());
    }
}
