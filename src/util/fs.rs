//! Filesystem utilities.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use walkdir::WalkDir;

/// Error while copying a template file.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("template file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("failed to copy to {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    fn from_io(err: io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => CopyError::NotFound { path },
            io::ErrorKind::PermissionDenied => CopyError::PermissionDenied { path },
            _ => CopyError::Io { path, source: err },
        }
    }
}

/// Copy a single file byte-for-byte, overwriting `dst` and creating its
/// parent directories.
///
/// Failures opening or reading the source carry `src`; failures creating or
/// writing the destination carry `dst`.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, CopyError> {
    let mut reader = File::open(src).map_err(|e| CopyError::from_io(e, src))?;
    let meta = reader.metadata().map_err(|e| CopyError::from_io(e, src))?;
    if !meta.is_file() {
        return Err(CopyError::NotAFile {
            path: src.to_path_buf(),
        });
    }

    let mut buf = Vec::with_capacity(meta.len() as usize);
    reader
        .read_to_end(&mut buf)
        .map_err(|e| CopyError::from_io(e, src))?;

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| CopyError::from_io(e, parent))?;
    }

    let mut writer = File::create(dst).map_err(|e| CopyError::from_io(e, dst))?;
    writer.write_all(&buf).map_err(|e| CopyError::from_io(e, dst))?;

    Ok(buf.len() as u64)
}

/// Copy each relative path from `src_dir` to the same relative path under
/// `dst_dir`, in order.
///
/// Stops at the first failure; files copied before it are left in place.
/// Returns the destination paths written.
pub fn copy_files<P: AsRef<Path>>(
    src_dir: &Path,
    dst_dir: &Path,
    names: &[P],
) -> Result<Vec<PathBuf>, CopyError> {
    let mut copied = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        let src = src_dir.join(name);
        let dst = dst_dir.join(name);

        let bytes = copy_file(&src, &dst)?;
        tracing::debug!("copied {} ({} bytes)", name.display(), bytes);
        copied.push(dst);
    }

    Ok(copied)
}

/// Write `contents` to `path` unless the file already holds exactly those
/// bytes. Returns whether the file was written.
pub fn write_if_changed(path: &Path, contents: &[u8]) -> io::Result<bool> {
    match fs::read(path) {
        Ok(existing) if existing == contents => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(true)
}

/// All regular files under `dir`, relative to it, sorted.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(relative_path(dir, entry.path()));
        }
    }

    files.sort();
    Ok(files)
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
