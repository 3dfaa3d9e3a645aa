//! Dependency sets.
//!
//! A package declares its npm dependencies in three categories:
//! runtime externals (supplied by the consuming environment at load time),
//! runtime dependencies inlined into the bundle, and dev-time dependencies.
//! Declaration order is kept because it drives the generated load order.

use indexmap::IndexMap;
use semver::VersionReq;
use serde::{Deserialize, Serialize};

/// Package name -> version range, in declaration order.
pub type DependencySet = IndexMap<String, String>;

/// Runtime dependencies, split by how the bundler treats them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTimeDeps {
    /// Not inlined; expected from the environment at load time.
    #[serde(default)]
    pub externals: DependencySet,

    /// Inlined into the output bundle.
    #[serde(default)]
    pub included_in_bundle: DependencySet,
}

/// All dependencies of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependencies {
    #[serde(default)]
    pub run_time: RunTimeDeps,

    #[serde(default)]
    pub dev_time: DependencySet,
}

impl Dependencies {
    /// Union of the keys of all three categories, each once, first-seen order.
    pub fn all_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let categories = [
            &self.run_time.externals,
            &self.run_time.included_in_bundle,
            &self.dev_time,
        ];
        for set in categories {
            for name in set.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// All runtime dependencies, externals first.
    pub fn runtime(&self) -> impl Iterator<Item = (&String, &String)> {
        self.run_time
            .externals
            .iter()
            .chain(self.run_time.included_in_bundle.iter())
    }

    /// Check whether `name` is declared as a runtime external.
    pub fn is_external(&self, name: &str) -> bool {
        self.run_time.externals.contains_key(name)
    }
}

/// Derive the API key of a dependency from its version range.
///
/// The key is the major version when non-zero, otherwise `0<minor>`, and
/// `00<patch>` when both are zero: `^6.5.5` gives `6`, `^0.128.0` gives
/// `0128` and `^0.0.2` gives `002`. npm range syntax is accepted; the first
/// alternative of a `||` union decides. Returns `None` for ranges without a
/// leading comparator, such as `*`.
pub fn api_key(range: &str) -> Option<String> {
    let req = VersionReq::parse(&npm_to_semver(range)).ok()?;
    let first = req.comparators.first()?;

    let minor = first.minor.unwrap_or(0);
    let patch = first.patch.unwrap_or(0);

    Some(if first.major > 0 {
        first.major.to_string()
    } else if minor > 0 {
        format!("0{}", minor)
    } else {
        format!("00{}", patch)
    })
}

/// Rewrite an npm range into the comma-separated form `semver` parses.
///
/// Keeps the first `||` alternative, turns `a - b` into `>=a, <=b` and joins
/// space-separated comparators with commas.
fn npm_to_semver(range: &str) -> String {
    let first = range.split("||").next().unwrap_or("").trim();

    if let Some((low, high)) = first.split_once(" - ") {
        return format!(">={}, <={}", low.trim(), high.trim());
    }

    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in first.split_whitespace() {
        let is_op = token.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~'));
        match pending_op.take() {
            Some(op) => comparators.push(format!("{}{}", op, token)),
            None if is_op => pending_op = Some(token),
            None => comparators.push(token.to_string()),
        }
    }
    comparators.join(", ")
}
