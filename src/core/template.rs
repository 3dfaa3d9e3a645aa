//! The template configuration handed to a generator.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::bundle::Bundles;
use crate::core::dependency::Dependencies;
use crate::core::manifest::{ManifestError, PackageManifest, MANIFEST_NAME};
use crate::core::spec::TemplateSpec;

/// Kind of package being generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    #[default]
    Library,
    Application,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Library => "library",
            PackageType::Application => "application",
        }
    }
}

/// Structural problem in a built template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("auxiliary module `{name}` is declared more than once")]
    DuplicateModule { name: String },

    #[error("module `{module}` has an empty entry file")]
    EmptyEntryFile { module: String },
}

/// Everything a generator needs to materialize a package's tooling files.
///
/// Built once from the manifest and a [`TemplateSpec`], never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Package root
    pub path: PathBuf,

    #[serde(rename = "type")]
    pub kind: PackageType,

    pub name: String,
    pub version: String,
    pub short_description: String,
    pub author: String,
    pub dependencies: Dependencies,

    /// Generate user-guide scaffolding
    pub user_guide: bool,

    pub bundles: Bundles,
}

impl Template {
    /// Combine manifest identity fields with the hard-coded part of a spec.
    ///
    /// Pure: the manifest is already parsed and nothing touches the disk.
    pub fn build(
        path: &Path,
        manifest: &Map<String, Value>,
        spec: &TemplateSpec,
    ) -> Result<Self, ManifestError> {
        let pkg = PackageManifest::from_map(manifest, &path.join(MANIFEST_NAME))?;

        Ok(Template {
            path: path.to_path_buf(),
            kind: spec.kind,
            name: pkg.name,
            version: pkg.version,
            short_description: pkg.description,
            author: pkg.author,
            dependencies: spec.dependencies.clone(),
            user_guide: spec.user_guide,
            bundles: spec.bundles.clone(),
        })
    }

    /// Check module definitions.
    ///
    /// Load dependencies that are not runtime externals are reported as
    /// warnings only: a bundled or dev-time name in a load list is unusual
    /// but the generator decides whether it can handle it.
    pub fn validate(&self) -> Result<Vec<String>, TemplateError> {
        let main = &self.bundles.main_module;
        if main.entry_file.trim().is_empty() {
            return Err(TemplateError::EmptyEntryFile {
                module: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for module in &self.bundles.auxiliary_modules {
            if !seen.insert(module.name.as_str()) {
                return Err(TemplateError::DuplicateModule {
                    name: module.name.clone(),
                });
            }
            if module.entry_file.trim().is_empty() {
                return Err(TemplateError::EmptyEntryFile {
                    module: module.name.clone(),
                });
            }
        }

        let mut warnings = Vec::new();
        let load_lists = std::iter::once((self.name.as_str(), &main.load_dependencies)).chain(
            self.bundles
                .auxiliary_modules
                .iter()
                .map(|m| (m.name.as_str(), &m.load_dependencies)),
        );
        for (module, deps) in load_lists {
            for dep in deps {
                if !self.dependencies.is_external(dep) {
                    warnings.push(format!(
                        "module `{}` loads `{}` which is not a runtime external",
                        module, dep
                    ));
                }
            }
        }

        Ok(warnings)
    }

    /// Package name without its npm scope.
    pub fn unscoped_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bundle::{AuxiliaryModule, MainModule};
    use crate::core::presets;
    use serde_json::json;

    fn manifest(name: &str, version: &str) -> Map<String, Value> {
        json!({
            "name": name,
            "version": version,
            "description": "test package",
            "author": "dev@example.com"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_build_copies_identity_verbatim() {
        let spec = presets::core();
        let template = Template::build(Path::new("/pkg"), &manifest("X", "1.2.3"), &spec).unwrap();

        assert_eq!(template.name, "X");
        assert_eq!(template.version, "1.2.3");
        assert_eq!(template.short_description, "test package");
        assert_eq!(template.author, "dev@example.com");
        assert_eq!(template.path, PathBuf::from("/pkg"));
        assert!(template.user_guide);
    }

    #[test]
    fn test_build_dependency_keys_match_spec() {
        let spec = presets::viewer();
        let template = Template::build(Path::new("."), &manifest("X", "0.1.0"), &spec).unwrap();

        let mut built = template.dependencies.all_names();
        built.sort_unstable();
        assert_eq!(
            built,
            vec![
                "@types/three",
                "@youwol/flux-view",
                "d3-dag",
                "rxjs",
                "three",
                "three-trackballcontrols",
            ]
        );
    }

    #[test]
    fn test_build_missing_field() {
        let mut map = manifest("X", "1.0.0");
        map.remove("author");
        let err = Template::build(Path::new("."), &map, &presets::core()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingField { field: "author" }));
    }

    #[test]
    fn test_serializes_with_generator_field_names() {
        let template =
            Template::build(Path::new("."), &manifest("X", "1.0.0"), &presets::core()).unwrap();
        let value = serde_json::to_value(&template).unwrap();

        assert_eq!(value["type"], "library");
        assert_eq!(value["shortDescription"], "test package");
        assert_eq!(value["userGuide"], true);
        assert!(value["dependencies"]["runTime"]["externals"]["three"].is_string());
        assert_eq!(
            value["bundles"]["mainModule"]["entryFile"],
            "./index.ts"
        );
        assert_eq!(
            value["bundles"]["auxiliaryModules"][0]["name"],
            "test-sphere-module"
        );
    }

    #[test]
    fn test_validate_core_preset_is_clean() {
        let template =
            Template::build(Path::new("."), &manifest("X", "1.0.0"), &presets::core()).unwrap();
        assert!(template.validate().unwrap().is_empty());
    }

    #[test]
    fn test_validate_warns_on_non_external_load() {
        let mut spec = presets::viewer();
        spec.bundles.main_module.load_dependencies.push("d3-dag".to_string());
        let template = Template::build(Path::new("."), &manifest("X", "1.0.0"), &spec).unwrap();

        let warnings = template.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("`d3-dag`"));
    }

    #[test]
    fn test_validate_duplicate_auxiliary() {
        let mut spec = presets::viewer();
        let aux = AuxiliaryModule {
            name: "extra".to_string(),
            entry_file: "./extra.ts".to_string(),
            load_dependencies: vec![],
        };
        spec.bundles.auxiliary_modules = vec![aux.clone(), aux];
        let template = Template::build(Path::new("."), &manifest("X", "1.0.0"), &spec).unwrap();

        assert!(matches!(
            template.validate(),
            Err(TemplateError::DuplicateModule { .. })
        ));
    }

    #[test]
    fn test_validate_empty_entry() {
        let mut spec = presets::viewer();
        spec.bundles.main_module = MainModule {
            entry_file: " ".to_string(),
            load_dependencies: vec![],
        };
        let template = Template::build(Path::new("."), &manifest("X", "1.0.0"), &spec).unwrap();

        assert!(matches!(
            template.validate(),
            Err(TemplateError::EmptyEntryFile { .. })
        ));
    }

    #[test]
    fn test_build_wrong_type_reports_manifest_under_root() {
        let mut map = manifest("X", "1.0.0");
        map.insert("description".to_string(), json!(42));
        let err = Template::build(Path::new("/pkg"), &map, &presets::core()).unwrap_err();

        match err {
            ManifestError::Parse { path, .. } => {
                assert_eq!(path, Path::new("/pkg").join(MANIFEST_NAME))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_package_type_names_match_serde() {
        for kind in [PackageType::Library, PackageType::Application] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }

    #[test]
    fn test_unscoped_name() {
        let template = Template::build(
            Path::new("."),
            &manifest("@youwol/vs-flow-core", "1.0.0"),
            &presets::core(),
        )
        .unwrap();
        assert_eq!(template.unscoped_name(), "vs-flow-core");
    }
}
