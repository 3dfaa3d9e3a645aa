//! Test fixtures for common test scenarios.
//!
//! Builders for package roots: a `package.json`, a populated `.template/`
//! directory, and a snapshot helper to compare whole trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{CopyManifest, MANIFEST_NAME};
use crate::util::fs::list_files;
use crate::util::hash::sha256_file;

/// `package.json` contents with the four identity fields.
pub fn package_json(name: &str, version: &str) -> String {
    format!(
        r#"{{
    "name": "{name}",
    "version": "{version}",
    "description": "Fixture package",
    "author": "fixture@example.com",
    "license": "MIT"
}}
"#
    )
}

/// Write a `package.json` into `root`, creating it if needed.
pub fn write_package(root: &Path, name: &str, version: &str) -> PathBuf {
    fs::create_dir_all(root).unwrap();
    let path = root.join(MANIFEST_NAME);
    fs::write(&path, package_json(name, version)).unwrap();
    path
}

/// Populate `<root>/.template/` with every entry of `copy`, each file
/// holding `"<prefix>: <relative path>"`.
pub fn write_template_dir(root: &Path, copy: &CopyManifest, prefix: &str) {
    let dir = CopyManifest::source_dir(root);
    for entry in copy.entries() {
        let path = dir.join(&entry);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("{}: {}", prefix, entry.display())).unwrap();
    }
}

/// Relative path -> SHA-256 of every file under `root`.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    list_files(root)
        .unwrap()
        .into_iter()
        .map(|rel| {
            let hash = sha256_file(&root.join(&rel)).unwrap();
            (rel, hash)
        })
        .collect()
}
