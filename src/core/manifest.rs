//! `package.json` manifest reading.
//!
//! The manifest is the identity source for a package: name, version,
//! description and author. It is read once per run and never written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// File name of the package manifest at the package root.
pub const MANIFEST_NAME: &str = "package.json";

/// Error while reading or interpreting a package manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read manifest: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("manifest is missing required field `{field}`")]
    MissingField { field: &'static str },
}

/// Parse the manifest at `path` into an ordered string-keyed mapping.
pub fn read_manifest(path: &Path) -> Result<Map<String, Value>, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ManifestError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ManifestError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let value: Value = serde_json::from_str(&contents).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => {
            tracing::debug!("read {} keys from {}", map.len(), path.display());
            Ok(map)
        }
        other => Err(ManifestError::Parse {
            path: path.to_path_buf(),
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

/// Identity fields extracted from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

impl PackageManifest {
    /// Extract the identity fields from a manifest parsed from `path`.
    ///
    /// `author` accepts either a plain string or an npm person object,
    /// in which case its `name` is used.
    pub fn from_map(map: &Map<String, Value>, path: &Path) -> Result<Self, ManifestError> {
        Ok(PackageManifest {
            name: string_field(map, "name", path)?,
            version: string_field(map, "version", path)?,
            description: string_field(map, "description", path)?,
            author: author_field(map, path)?,
        })
    }
}

fn string_field(
    map: &Map<String, Value>,
    field: &'static str,
    path: &Path,
) -> Result<String, ManifestError> {
    match map.get(field) {
        None => Err(ManifestError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(field, other, path)),
    }
}

fn author_field(map: &Map<String, Value>, path: &Path) -> Result<String, ManifestError> {
    const FIELD: &str = "author";

    match map.get(FIELD) {
        None => Err(ManifestError::MissingField { field: FIELD }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Object(person)) => match person.get("name") {
            Some(Value::String(name)) => Ok(name.clone()),
            _ => Err(ManifestError::Parse {
                path: path.to_path_buf(),
                message: "`author` object has no string `name`".to_string(),
            }),
        },
        Some(other) => Err(wrong_type(FIELD, other, path)),
    }
}

fn wrong_type(field: &str, value: &Value, path: &Path) -> ManifestError {
    ManifestError::Parse {
        path: path.to_path_buf(),
        message: format!("`{}` must be a string, found {}", field, json_kind(value)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
