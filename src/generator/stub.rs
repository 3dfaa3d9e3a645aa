//! Rendering of the `src/auto-generated.ts` setup stub.
//!
//! The stub exposes the package's runtime dependency table, webpack
//! externals, exported symbols and entry points, plus helpers to install the
//! main or an auxiliary module from the CDN.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{json, Map, Value};

use super::GeneratorError;
use crate::core::dependency::api_key;
use crate::core::Template;

/// Base URL of the hosted developer documentation.
pub const DEV_DOC_URL: &str =
    "https://platform.youwol.com/applications/@youwol/cdn-explorer/latest?package=";

/// Base URL of hosted user guides.
pub const USER_GUIDE_URL: &str = "https://l.youwol.com/doc/";

/// GitHub organization hosting package sources.
pub const GITHUB_ORG_URL: &str = "https://github.com/youwol/";

/// Global symbols for packages that do not export under their own name.
const EXPORTED_SYMBOLS: &[(&str, &str)] = &[("three", "THREE"), ("lodash", "_")];

/// Sub-paths imported directly, which need their own externals entry.
const SUB_MODULES: &[(&str, &[&str])] = &[("rxjs", &["operators"])];

/// Global symbol a dependency is exported under.
pub fn exported_symbol(name: &str) -> &str {
    EXPORTED_SYMBOLS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, s)| *s)
        .unwrap_or(name)
}

/// Stable asset id of a package: its name, base64-encoded.
pub fn asset_id(name: &str) -> String {
    STANDARD.encode(name)
}

fn require_api_key(name: &str, range: &str) -> Result<String, GeneratorError> {
    api_key(range).ok_or_else(|| {
        GeneratorError::new(format!(
            "cannot derive an API version for `{}` from `{}`",
            name, range
        ))
    })
}

/// Serialize with 4-space indentation.
pub(crate) fn pretty_json(value: &Value) -> Result<String, GeneratorError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| GeneratorError::with_source("failed to serialize JSON", e))?;
    String::from_utf8(buf).map_err(|e| GeneratorError::with_source("invalid UTF-8 in JSON", e))
}

/// Render the stub for `template`.
pub fn render(template: &Template) -> Result<String, GeneratorError> {
    let deps = &template.dependencies;
    let name = template.name.as_str();

    let mut keys = Vec::with_capacity(deps.run_time.externals.len());
    for (dep, range) in &deps.run_time.externals {
        keys.push((dep.as_str(), require_api_key(dep, range)?));
    }
    let api_version = require_api_key(name, &template.version)?;

    let run_time = json!({
        "externals": deps.run_time.externals,
        "includedInBundle": deps.run_time.included_in_bundle,
    });

    let mut externals = Map::new();
    for (dep, key) in &keys {
        let root = format!("{}_APIv{}", exported_symbol(dep), key);
        externals.insert(
            dep.to_string(),
            json!({ "commonjs": dep, "commonjs2": dep, "root": root }),
        );
    }
    for (dep, key) in &keys {
        let Some((_, subs)) = SUB_MODULES.iter().find(|(n, _)| n == dep) else {
            continue;
        };
        let root = format!("{}_APIv{}", exported_symbol(dep), key);
        for sub in subs.iter() {
            let path = format!("{}/{}", dep, sub);
            externals.insert(
                path.clone(),
                json!({ "commonjs": path, "commonjs2": path, "root": [root, sub] }),
            );
        }
    }

    let mut symbols = Map::new();
    for (dep, key) in &keys {
        symbols.insert(
            dep.to_string(),
            json!({ "apiKey": key, "exportedSymbol": exported_symbol(dep) }),
        );
    }

    let main = &template.bundles.main_module;
    let main_entry = json!({
        "entryFile": main.entry_file,
        "loadDependencies": main.load_dependencies,
    });

    let mut secondary = Map::new();
    for aux in &template.bundles.auxiliary_modules {
        secondary.insert(
            aux.name.clone(),
            json!({
                "entryFile": aux.entry_file,
                "loadDependencies": aux.load_dependencies,
                "name": aux.name,
            }),
        );
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "const runTimeDependencies = {}\n",
        pretty_json(&run_time)?
    ));
    out.push_str(&format!(
        "const externals = {}\n",
        pretty_json(&Value::Object(externals))?
    ));
    out.push_str(&format!(
        "const exportedSymbols = {}\n\n",
        pretty_json(&Value::Object(symbols))?
    ));
    out.push_str(&format!(
        "const mainEntry : {{entryFile: string,loadDependencies:string[]}} = {}\n\n",
        pretty_json(&main_entry)?
    ));
    out.push_str(&format!(
        "const secondaryEntries : {{[k:string]:{{entryFile: string, name: string, loadDependencies:string[]}}}}= {}\n\n",
        pretty_json(&Value::Object(secondary))?
    ));
    out.push_str(&ENTRIES.replace("%NAME%", name).replace("%ENTRY%", &main.entry_file));

    let user_guide = if template.user_guide {
        format!("    userGuide:'{}{}',\n", USER_GUIDE_URL, name)
    } else {
        String::new()
    };
    let description = serde_json::to_string(&template.short_description)
        .map_err(|e| GeneratorError::with_source("failed to quote description", e))?;

    out.push_str(&format!(
        "export const setup = {{\n    name:'{name}',\n        assetId:'{asset}',\n    version:'{version}',\n    shortDescription:{description},\n    developerDocumentation:'{dev_doc}{name}',\n    npmPackage:'https://www.npmjs.com/package/{name}',\n    sourceGithub:'{github}{repo}',\n{user_guide}    apiVersion:'{api}',\n",
        name = name,
        asset = asset_id(name),
        version = template.version,
        description = description,
        dev_doc = DEV_DOC_URL,
        github = GITHUB_ORG_URL,
        repo = template.unscoped_name(),
        user_guide = user_guide,
        api = api_version,
    ));
    out.push_str(
        &SETUP_BODY
            .replace("%NAME%", name)
            .replace("%VERSION%", &template.version)
            .replace("%API%", &api_version),
    );

    Ok(out)
}

const ENTRIES: &str = r#"const entries = {
     '%NAME%': '%ENTRY%',
    ...Object.values(secondaryEntries).reduce( (acc,e) => ({...acc, [`%NAME%/${e.name}`]:e.entryFile}), {})
}
"#;

const SETUP_BODY: &str = r#"    runTimeDependencies,
    externals,
    exportedSymbols,
    entries,
    secondaryEntries,
    getDependencySymbolExported: (module:string) => {
        return `${exportedSymbols[module].exportedSymbol}_APIv${exportedSymbols[module].apiKey}`
    },

    installMainModule: ({cdnClient, installParameters}:{
        cdnClient:{install:(unknown) => Promise<Window>},
        installParameters?
    }) => {
        const parameters = installParameters || {}
        const scripts = parameters.scripts || []
        const modules = [
            ...(parameters.modules || []),
            ...mainEntry.loadDependencies.map( d => `${d}#${runTimeDependencies.externals[d]}`)
        ]
        return cdnClient.install({
            ...parameters,
            modules,
            scripts,
        }).then(() => {
            return window[`%NAME%_APIv%API%`]
        })
    },
    installAuxiliaryModule: ({name, cdnClient, installParameters}:{
        name: string,
        cdnClient:{install:(unknown) => Promise<Window>},
        installParameters?
    }) => {
        const entry = secondaryEntries[name]
        if(!entry){
            throw Error(`Can not find the secondary entry '${name}'. Referenced in template.toml?`)
        }
        const parameters = installParameters || {}
        const scripts = [
            ...(parameters.scripts || []),
            `%NAME%#%VERSION%~dist/%NAME%/${entry.name}.js`
        ]
        const modules = [
            ...(parameters.modules || []),
            ...entry.loadDependencies.map( d => `${d}#${runTimeDependencies.externals[d]}`)
        ]
        return cdnClient.install({
            ...parameters,
            modules,
            scripts,
        }).then(() => {
            return window[`%NAME%/${entry.name}_APIv%API%`]
        })
    },
    getCdnDependencies(name?: string){
        if(name && !secondaryEntries[name]){
            throw Error(`Can not find the secondary entry '${name}'. Referenced in template.toml?`)
        }
        const deps = name ? secondaryEntries[name].loadDependencies : mainEntry.loadDependencies

        return deps.map( d => `${d}#${runTimeDependencies.externals[d]}`)
    }
}
"#;
