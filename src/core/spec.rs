//! Template specs: the hard-coded half of a template configuration.
//!
//! A spec holds everything that does not come from `package.json`: package
//! kind, dependency tables, module definitions, the copy manifest and the
//! generator to run. Specs come from a built-in preset or a `template.toml`
//! at the package root:
//!
//! ```toml
//! [package]
//! kind = "library"
//! user-guide = true
//!
//! [dependencies.runtime.externals]
//! rxjs = "^6.5.5"
//!
//! [dependencies.dev]
//! "@types/three" = "^0.128.0"
//!
//! [bundles.main]
//! entry-file = "./index.ts"
//!
//! [[bundles.auxiliary]]
//! name = "rxjs"
//! entry-file = "./toolboxes/rxjs/index.ts"
//! load-dependencies = ["rxjs"]
//!
//! [copy]
//! files = ["README.md", "package.json"]
//!
//! [generator]
//! kind = "builtin"
//! ```
//!
//! When `[bundles.main]` omits `load-dependencies`, every runtime external is
//! loaded, in declaration order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::bundle::{AuxiliaryModule, Bundles, MainModule};
use crate::core::copy_manifest::{CopyManifest, DEFAULT_FILES, DEFAULT_STUB};
use crate::core::dependency::{Dependencies, DependencySet, RunTimeDeps};
use crate::core::template::PackageType;

/// Spec file name at the package root.
pub const SPEC_FILE: &str = "template.toml";

/// Error while loading a spec.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read spec file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse spec file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unknown preset `{name}` (available: {available})")]
    UnknownPreset { name: String, available: String },
}

/// Which generator materializes the template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorConfig {
    /// The generator shipped with pkgsmith
    #[default]
    Builtin,

    /// An external program receiving the template as JSON on stdin
    Command {
        program: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
}

/// The hard-coded part of a template configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub kind: PackageType,
    pub dependencies: Dependencies,
    pub bundles: Bundles,
    pub user_guide: bool,
    pub copy: CopyManifest,
    pub generator: GeneratorConfig,
}

impl TemplateSpec {
    /// Load a spec from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse spec TOML; `path` is only used in error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, SpecError> {
        let raw: RawSpec = toml::from_str(contents).map_err(|e| SpecError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        Ok(raw.into())
    }

    /// Locate `template.toml` under `root`, if present.
    pub fn find(root: &Path) -> Option<PathBuf> {
        let path = root.join(SPEC_FILE);
        path.is_file().then_some(path)
    }

    /// Render the spec as `template.toml` contents.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&RawSpec::from(self))
    }
}

// =============================================================================
// On-disk layout
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSpec {
    #[serde(default)]
    package: RawPackage,

    #[serde(default)]
    dependencies: RawDependencies,

    #[serde(default)]
    bundles: RawBundles,

    #[serde(default)]
    copy: RawCopy,

    #[serde(default)]
    generator: GeneratorConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawPackage {
    #[serde(default)]
    kind: PackageType,

    #[serde(default)]
    user_guide: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawDependencies {
    #[serde(default)]
    runtime: RawRunTime,

    #[serde(default)]
    dev: DependencySet,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawRunTime {
    #[serde(default)]
    externals: DependencySet,

    #[serde(default)]
    included_in_bundle: DependencySet,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawBundles {
    #[serde(default)]
    main: RawMain,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    auxiliary: Vec<RawAuxiliary>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawMain {
    #[serde(default = "default_entry_file")]
    entry_file: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    load_dependencies: Option<Vec<String>>,
}

impl Default for RawMain {
    fn default() -> Self {
        RawMain {
            entry_file: default_entry_file(),
            load_dependencies: None,
        }
    }
}

fn default_entry_file() -> String {
    "./index.ts".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawAuxiliary {
    name: String,
    entry_file: String,

    #[serde(default)]
    load_dependencies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawCopy {
    #[serde(default = "default_files")]
    files: Vec<String>,

    /// Empty string disables the stub copy.
    #[serde(default = "default_stub")]
    stub: String,
}

impl Default for RawCopy {
    fn default() -> Self {
        RawCopy {
            files: default_files(),
            stub: default_stub(),
        }
    }
}

fn default_files() -> Vec<String> {
    DEFAULT_FILES.iter().map(|f| f.to_string()).collect()
}

fn default_stub() -> String {
    DEFAULT_STUB.to_string()
}

impl From<RawSpec> for TemplateSpec {
    fn from(raw: RawSpec) -> Self {
        let externals = raw.dependencies.runtime.externals;
        let main_loads = raw
            .bundles
            .main
            .load_dependencies
            .unwrap_or_else(|| externals.keys().cloned().collect());

        TemplateSpec {
            kind: raw.package.kind,
            dependencies: Dependencies {
                run_time: RunTimeDeps {
                    externals,
                    included_in_bundle: raw.dependencies.runtime.included_in_bundle,
                },
                dev_time: raw.dependencies.dev,
            },
            bundles: Bundles {
                main_module: MainModule {
                    entry_file: raw.bundles.main.entry_file,
                    load_dependencies: main_loads,
                },
                auxiliary_modules: raw
                    .bundles
                    .auxiliary
                    .into_iter()
                    .map(|a| AuxiliaryModule {
                        name: a.name,
                        entry_file: a.entry_file,
                        load_dependencies: a.load_dependencies,
                    })
                    .collect(),
            },
            user_guide: raw.package.user_guide,
            copy: CopyManifest {
                files: raw.copy.files,
                stub: Some(raw.copy.stub).filter(|s| !s.is_empty()),
            },
            generator: raw.generator,
        }
    }
}

impl From<&TemplateSpec> for RawSpec {
    fn from(spec: &TemplateSpec) -> Self {
        RawSpec {
            package: RawPackage {
                kind: spec.kind,
                user_guide: spec.user_guide,
            },
            dependencies: RawDependencies {
                runtime: RawRunTime {
                    externals: spec.dependencies.run_time.externals.clone(),
                    included_in_bundle: spec.dependencies.run_time.included_in_bundle.clone(),
                },
                dev: spec.dependencies.dev_time.clone(),
            },
            bundles: RawBundles {
                main: RawMain {
                    entry_file: spec.bundles.main_module.entry_file.clone(),
                    load_dependencies: Some(spec.bundles.main_module.load_dependencies.clone()),
                },
                auxiliary: spec
                    .bundles
                    .auxiliary_modules
                    .iter()
                    .map(|a| RawAuxiliary {
                        name: a.name.clone(),
                        entry_file: a.entry_file.clone(),
                        load_dependencies: a.load_dependencies.clone(),
                    })
                    .collect(),
            },
            copy: RawCopy {
                files: spec.copy.files.clone(),
                stub: spec.copy.stub.clone().unwrap_or_default(),
            },
            generator: spec.generator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::presets;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_spec() {
        let spec = TemplateSpec::parse(
            r#"
[package]
kind = "library"
user-guide = true

[dependencies.runtime.externals]
rxjs = "^6.5.5"
"@youwol/cdn-client" = "^1.0.2"

[dependencies.runtime.included-in-bundle]
d3-dag = "0.8.2"

[dependencies.dev]
"@types/three" = "^0.128.0"

[bundles.main]
entry-file = "./main.ts"
load-dependencies = ["rxjs"]

[[bundles.auxiliary]]
name = "extra"
entry-file = "./extra.ts"
load-dependencies = ["rxjs"]

[copy]
files = ["README.md"]
stub = ""

[generator]
kind = "command"
program = "node"
args = ["gen.js"]
"#,
            Path::new(SPEC_FILE),
        )
        .unwrap();

        assert!(spec.user_guide);
        let externals: Vec<&String> = spec.dependencies.run_time.externals.keys().collect();
        assert_eq!(externals, vec!["rxjs", "@youwol/cdn-client"]);
        assert_eq!(
            spec.dependencies.run_time.included_in_bundle["d3-dag"],
            "0.8.2"
        );
        assert_eq!(spec.bundles.main_module.entry_file, "./main.ts");
        assert_eq!(spec.bundles.auxiliary_modules.len(), 1);
        assert_eq!(spec.copy.files, vec!["README.md"]);
        assert_eq!(spec.copy.stub, None);
        assert_eq!(
            spec.generator,
            GeneratorConfig::Command {
                program: "node".to_string(),
                args: vec!["gen.js".to_string()],
            }
        );
    }

    #[test]
    fn test_main_loads_default_to_externals_in_order() {
        let spec = TemplateSpec::parse(
            r#"
[dependencies.runtime.externals]
"@youwol/flux-view" = "^1.0.3"
rxjs = "^6.5.5"
three = "^0.128.0"
"#,
            Path::new(SPEC_FILE),
        )
        .unwrap();

        assert_eq!(spec.bundles.main_module.entry_file, "./index.ts");
        assert_eq!(
            spec.bundles.main_module.load_dependencies,
            vec!["@youwol/flux-view", "rxjs", "three"]
        );
        assert_eq!(spec.copy, CopyManifest::default());
        assert_eq!(spec.generator, GeneratorConfig::Builtin);
        assert_eq!(spec.kind, PackageType::Library);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = TemplateSpec::parse("[package]\nflavour = \"x\"\n", Path::new(SPEC_FILE))
            .unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
    }

    #[test]
    fn test_preset_survives_toml() {
        let spec = presets::core();
        let text = spec.to_toml_string().unwrap();
        let parsed = TemplateSpec::parse(&text, Path::new(SPEC_FILE)).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_load_and_find() {
        let tmp = TempDir::new().unwrap();
        assert!(TemplateSpec::find(tmp.path()).is_none());

        std::fs::write(tmp.path().join(SPEC_FILE), "[package]\nuser-guide = true\n").unwrap();
        let path = TemplateSpec::find(tmp.path()).unwrap();
        let spec = TemplateSpec::load(&path).unwrap();
        assert!(spec.user_guide);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = TemplateSpec::load(&tmp.path().join(SPEC_FILE)).unwrap_err();
        assert!(matches!(err, SpecError::Read { .. }));
    }
}
