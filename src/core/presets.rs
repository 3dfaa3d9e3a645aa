//! Built-in template specs.
//!
//! Each preset reproduces the configuration of one of the flow packages:
//! `core`, a library with auxiliary modules, and `viewer`, a library that
//! inlines `d3-dag` into its bundle.

use crate::core::bundle::{AuxiliaryModule, Bundles, MainModule};
use crate::core::copy_manifest::CopyManifest;
use crate::core::dependency::{Dependencies, DependencySet, RunTimeDeps};
use crate::core::spec::{GeneratorConfig, SpecError, TemplateSpec};
use crate::core::template::PackageType;

/// Preset names with a one-line description.
pub const PRESETS: &[(&str, &str)] = &[
    ("core", "library with test and toolbox auxiliary modules"),
    ("viewer", "3D viewer library bundling d3-dag"),
];

/// Look up a preset by name.
pub fn preset(name: &str) -> Result<TemplateSpec, SpecError> {
    match name {
        "core" => Ok(core()),
        "viewer" => Ok(viewer()),
        _ => Err(SpecError::UnknownPreset {
            name: name.to_string(),
            available: PRESETS
                .iter()
                .map(|(n, _)| *n)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

fn deps(pairs: &[(&str, &str)]) -> DependencySet {
    pairs
        .iter()
        .map(|(name, range)| (name.to_string(), range.to_string()))
        .collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// The core flow library.
pub fn core() -> TemplateSpec {
    let load_dependencies = deps(&[
        ("rxjs", "^6.5.5"),
        ("@youwol/cdn-client", "^1.0.2"),
        ("@youwol/logging", "^0.0.2"),
    ]);
    let main_loads: Vec<String> = load_dependencies.keys().cloned().collect();

    // `three` is only needed by the test-sphere-module auxiliary module and
    // belongs in dev-time dependencies, but the generator only externalizes
    // runtime dependencies, so it has to be declared here.
    let mut externals = load_dependencies;
    externals.insert("three".to_string(), "^0.128.0".to_string());

    TemplateSpec {
        kind: PackageType::Library,
        dependencies: Dependencies {
            run_time: RunTimeDeps {
                externals,
                included_in_bundle: DependencySet::new(),
            },
            dev_time: deps(&[("@youwol/flux-view", "^1.0.3")]),
        },
        bundles: Bundles {
            main_module: MainModule {
                entry_file: "./index.ts".to_string(),
                load_dependencies: main_loads,
            },
            auxiliary_modules: vec![
                AuxiliaryModule {
                    name: "test-sphere-module".to_string(),
                    entry_file: "./tests/modules-implementation/sphere.module.ts".to_string(),
                    load_dependencies: names(&["three", "rxjs"]),
                },
                AuxiliaryModule {
                    name: "rxjs".to_string(),
                    entry_file: "./toolboxes/rxjs/index.ts".to_string(),
                    load_dependencies: names(&["rxjs"]),
                },
            ],
        },
        user_guide: true,
        copy: CopyManifest::new([
            "README.md",
            ".gitignore",
            ".npmignore",
            ".prettierignore",
            "LICENSE",
            "package.json",
            "tsconfig.json",
            "webpack.config.ts",
        ]),
        generator: GeneratorConfig::Builtin,
    }
}

/// The 3D flow viewer library.
pub fn viewer() -> TemplateSpec {
    let externals = deps(&[
        ("@youwol/flux-view", "^1.0.3"),
        ("rxjs", "^6.5.5"),
        ("three-trackballcontrols", "^0.0.8"),
        ("three", "^0.128.0"),
    ]);
    let main_loads: Vec<String> = externals.keys().cloned().collect();

    TemplateSpec {
        kind: PackageType::Library,
        dependencies: Dependencies {
            run_time: RunTimeDeps {
                externals,
                included_in_bundle: deps(&[("d3-dag", "0.8.2")]),
            },
            dev_time: deps(&[("@types/three", "^0.128.0")]),
        },
        bundles: Bundles::main_only(MainModule {
            entry_file: "./index.ts".to_string(),
            load_dependencies: main_loads,
        }),
        user_guide: true,
        copy: CopyManifest::new([
            "README.md",
            "package.json",
            "jest.config.ts",
            "tsconfig.json",
            "webpack.config.ts",
        ]),
        generator: GeneratorConfig::Builtin,
    }
}
