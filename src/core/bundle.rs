//! Module entry points compiled as separate output bundles.

use serde::{Deserialize, Serialize};

/// The package's main entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainModule {
    /// Entry file, relative to `src/`
    pub entry_file: String,

    /// Dependencies loaded before the module executes, in order
    pub load_dependencies: Vec<String>,
}

/// A named secondary entry point with its own dependency subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxiliaryModule {
    pub name: String,
    pub entry_file: String,
    pub load_dependencies: Vec<String>,
}

/// Main module plus zero or more auxiliary modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundles {
    pub main_module: MainModule,

    #[serde(default)]
    pub auxiliary_modules: Vec<AuxiliaryModule>,
}

impl Bundles {
    /// Bundles with only a main module.
    pub fn main_only(main_module: MainModule) -> Self {
        Bundles {
            main_module,
            auxiliary_modules: Vec::new(),
        }
    }
}
