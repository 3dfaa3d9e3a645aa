//! Boilerplate files rendered by the built-in generator.

use std::path::PathBuf;

use serde_json::{json, Map, Value};

use super::stub::{self, pretty_json, DEV_DOC_URL, GITHUB_ORG_URL, USER_GUIDE_URL};
use super::GeneratorError;
use crate::core::copy_manifest::DEFAULT_STUB;
use crate::core::{PackageType, Template};

/// Tooling the generated build and test setup relies on.
const TOOLING_DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@types/jest", "^28.1.3"),
    ("@types/node", "^18.0.0"),
    ("@youwol/prettier-config", "^0.1.0"),
    ("del-cli", "^4.0.1"),
    ("jest", "^28.1.3"),
    ("prettier", "^2.7.1"),
    ("ts-jest", "^28.0.5"),
    ("ts-loader", "^9.3.1"),
    ("ts-node", "^10.8.1"),
    ("typedoc", "^0.23.8"),
    ("typescript", "^4.7.4"),
    ("webpack", "^5.73.0"),
    ("webpack-cli", "^4.10.0"),
];

/// Render every file of the template directory, as paths relative to it.
pub fn render_all(template: &Template) -> Result<Vec<(PathBuf, String)>, GeneratorError> {
    Ok(vec![
        (PathBuf::from(DEFAULT_STUB), stub::render(template)?),
        (PathBuf::from("package.json"), package_json(template)?),
        (PathBuf::from("README.md"), readme(template)),
        (PathBuf::from("LICENSE"), license(template)),
        (PathBuf::from(".gitignore"), GITIGNORE.to_string()),
        (PathBuf::from(".npmignore"), NPMIGNORE.to_string()),
        (PathBuf::from(".prettierignore"), PRETTIERIGNORE.to_string()),
        (PathBuf::from("tsconfig.json"), tsconfig()?),
        (PathBuf::from("jest.config.ts"), JEST_CONFIG.to_string()),
        (PathBuf::from("webpack.config.ts"), webpack_config(template)),
    ])
}

/// The generated `package.json`.
pub fn package_json(template: &Template) -> Result<String, GeneratorError> {
    let deps = &template.dependencies;

    let mut dependencies = Map::new();
    for (name, range) in deps.runtime() {
        dependencies.insert(name.clone(), Value::String(range.clone()));
    }

    let mut dev_dependencies = Map::new();
    for (name, range) in &deps.dev_time {
        dev_dependencies.insert(name.clone(), Value::String(range.clone()));
    }
    for (name, range) in TOOLING_DEV_DEPENDENCIES {
        if !dev_dependencies.contains_key(*name) {
            dev_dependencies.insert(name.to_string(), Value::String(range.to_string()));
        }
    }

    let mut scripts = json!({
        "clean": "del-cli dist",
        "auto-gen": "pkgsmith generate",
        "build": "yarn build:dev",
        "pre-build": "yarn clean",
        "build:dev": "yarn pre-build && webpack --mode development",
        "build:prod": "yarn pre-build && webpack --mode production",
        "lint-check": "prettier --check ./src",
        "test": "jest -i",
        "test-coverage": "jest -i --collect-coverage",
        "doc": "typedoc src/ --exclude src/lib --exclude src/tests --out dist/docs",
        "publish-npm": "yarn build:prod && yarn test-coverage && yarn publish --access public"
    });
    if template.kind == PackageType::Application {
        scripts["start"] = json!("webpack serve --mode development");
    }

    let manifest = json!({
        "name": template.name,
        "description": template.short_description,
        "version": template.version,
        "author": template.author,
        "license": "MIT",
        "main": format!("dist/{}.js", template.name),
        "types": "src/index.ts",
        "files": ["dist", "src", "LICENSE", "README.md"],
        "scripts": scripts,
        "prettier": "@youwol/prettier-config",
        "dependencies": dependencies,
        "devDependencies": dev_dependencies,
        "youwol": {
            "cdnDependencies": deps.run_time.externals,
        },
    });

    let mut out = pretty_json(&manifest)?;
    out.push('\n');
    Ok(out)
}

/// The generated `README.md`.
pub fn readme(template: &Template) -> String {
    let name = &template.name;
    let mut out = format!("# {}\n\n{}\n\n## Links\n\n", name, template.short_description);

    if template.user_guide {
        out.push_str(&format!("[Online user-guide]({}{})\n\n", USER_GUIDE_URL, name));
    }
    out.push_str(&format!(
        "[Developers documentation]({}{})\n\n",
        DEV_DOC_URL, name
    ));
    out.push_str(&format!(
        "[Package on npm](https://www.npmjs.com/package/{})\n\n",
        name
    ));
    out.push_str(&format!(
        "[Source on GitHub]({}{})\n\n",
        GITHUB_ORG_URL,
        template.unscoped_name()
    ));
    out.push_str(
        "# Installation, Build, Test\n\n\
         To install the required dependencies:\n\n\
         ```shell\nyarn\n```\n\n\
         To build for development:\n\n\
         ```shell\nyarn build:dev\n```\n\n\
         To build for production:\n\n\
         ```shell\nyarn build:prod\n```\n\n\
         Tests are run with jest:\n\n\
         ```shell\nyarn test\n```\n",
    );
    out
}

/// The generated MIT `LICENSE`.
pub fn license(template: &Template) -> String {
    format!(
        "MIT License\n\n\
         Copyright (c) {author}\n\n\
         Permission is hereby granted, free of charge, to any person obtaining a copy\n\
         of this software and associated documentation files (the \"Software\"), to deal\n\
         in the Software without restriction, including without limitation the rights\n\
         to use, copy, modify, merge, publish, distribute, sublicense, and/or sell\n\
         copies of the Software, and to permit persons to whom the Software is\n\
         furnished to do so, subject to the following conditions:\n\n\
         The above copyright notice and this permission notice shall be included in all\n\
         copies or substantial portions of the Software.\n\n\
         THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR\n\
         IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,\n\
         FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE\n\
         AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER\n\
         LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,\n\
         OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE\n\
         SOFTWARE.\n",
        author = template.author
    )
}

fn tsconfig() -> Result<String, GeneratorError> {
    let config = json!({
        "compilerOptions": {
            "target": "es2020",
            "module": "es2020",
            "moduleResolution": "node",
            "lib": ["es2020", "dom"],
            "declaration": true,
            "sourceMap": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "outDir": "dist",
        },
        "include": ["src"],
        "exclude": ["node_modules", "dist"],
    });
    let mut out = pretty_json(&config)?;
    out.push('\n');
    Ok(out)
}

fn webpack_config(template: &Template) -> String {
    let dev_server = if template.kind == PackageType::Application {
        "    devServer: {\n        static: DESTINATION,\n        port: 3000,\n    },\n"
    } else {
        ""
    };
    WEBPACK_CONFIG.replace("%DEV_SERVER%", dev_server)
}

const GITIGNORE: &str = "node_modules/\ndist/\ncoverage/\n.idea/\n.vscode/\n*.log\n";

const NPMIGNORE: &str = "src/tests/\ncoverage/\n.template/\ntemplate.toml\n";

const PRETTIERIGNORE: &str = "dist/\ncoverage/\n.template/\nsrc/auto-generated.ts\n";

const JEST_CONFIG: &str = r#"import type { Config } from '@jest/types'

const config: Config.InitialOptions = {
    preset: 'ts-jest',
    testEnvironment: 'jsdom',
    testRunner: 'jest-jasmine2',
    testPathIgnorePatterns: ['/node_modules/', '/dist/'],
    coveragePathIgnorePatterns: ['/node_modules/', '/dist/', '/src/tests/'],
    modulePathIgnorePatterns: ['/dist/'],
}
export default config
"#;

const WEBPACK_CONFIG: &str = r#"import * as path from 'path'
import * as webpack from 'webpack'
import { setup } from './src/auto-generated'

const ROOT = path.resolve(__dirname, 'src')
const DESTINATION = path.resolve(__dirname, 'dist')

const config: webpack.Configuration = {
    context: ROOT,
    entry: setup.entries,
    output: {
        path: DESTINATION,
        publicPath: `/api/assets-gateway/raw/package/${setup.assetId}/${setup.version}/dist/`,
        libraryTarget: 'umd',
        umdNamedDefine: true,
        library: {
            name: `[name]_APIv${setup.apiVersion}`,
            type: 'umd',
        },
        filename: '[name].js',
        globalObject: `(typeof self !== 'undefined' ? self : this)`,
    },
    resolve: {
        extensions: ['.ts', 'tsx', '.js'],
        modules: [ROOT, 'node_modules'],
    },
    externals: setup.externals,
    module: {
        rules: [
            {
                test: /\.ts$/,
                use: [{ loader: 'ts-loader' }],
                exclude: /node_modules/,
            },
        ],
    },
    devtool: 'source-map',
%DEV_SERVER%}
export default config
"#;
