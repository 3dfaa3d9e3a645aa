//! `pkgsmith generate` command

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::cli::{GenerateArgs, SpecArgs};
use pkgsmith::core::presets::preset;
use pkgsmith::core::{GeneratorConfig, TemplateSpec, SPEC_FILE};
use pkgsmith::generator::from_config;
use pkgsmith::ops::generate;

pub fn execute(args: GenerateArgs) -> Result<()> {
    let root = package_root(args.path)?;
    let mut spec = resolve_spec(&root, &args.spec)?;

    if let Some(program) = args.generator_cmd {
        spec.generator = GeneratorConfig::Command {
            program,
            args: args.generator_arg,
        };
    }

    let generator = from_config(&spec.generator);
    let report = generate(&root, &spec, generator.as_ref())?;

    for path in &report.copied {
        let shown = path.strip_prefix(&root).unwrap_or(path);
        tracing::debug!("copied {}", shown.display());
    }

    eprintln!(
        "   Generated `{}` v{} ({} files copied)",
        report.template.name,
        report.template.version,
        report.copied.len()
    );

    Ok(())
}

/// The package root a command operates on.
pub fn package_root(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => std::env::current_dir().context("failed to determine current directory"),
    }
}

/// Pick the spec: `--preset`, then `--config`, then `template.toml` in the root.
pub fn resolve_spec(root: &Path, args: &SpecArgs) -> Result<TemplateSpec> {
    if let Some(name) = &args.preset {
        return Ok(preset(name)?);
    }

    let path = match &args.config {
        Some(path) => path.clone(),
        None => match TemplateSpec::find(root) {
            Some(path) => path,
            None => bail!(
                "no `{}` found in {}\n\nhelp: pass `--preset <NAME>` (see `pkgsmith presets`) or `--config <FILE>`",
                SPEC_FILE,
                root.display()
            ),
        },
    };

    tracing::debug!("loading spec from {}", path.display());
    Ok(TemplateSpec::load(&path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse_generate_args(args: &[&str]) -> GenerateArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            generate: GenerateArgs,
        }
        TestCli::parse_from(args).generate
    }

    #[test]
    fn test_generate_args_defaults() {
        let args = parse_generate_args(&["test"]);

        assert!(args.path.is_none());
        assert!(args.spec.preset.is_none());
        assert!(args.spec.config.is_none());
        assert!(args.generator_cmd.is_none());
        assert!(args.generator_arg.is_empty());
    }

    #[test]
    fn test_generate_args_full() {
        let args = parse_generate_args(&[
            "test",
            "pkg",
            "--preset",
            "viewer",
            "--generator-cmd",
            "node",
            "--generator-arg",
            "gen.js",
            "--generator-arg",
            "--quiet",
        ]);

        assert_eq!(args.path, Some(PathBuf::from("pkg")));
        assert_eq!(args.spec.preset.as_deref(), Some("viewer"));
        assert_eq!(args.generator_cmd.as_deref(), Some("node"));
        assert_eq!(args.generator_arg, vec!["gen.js", "--quiet"]);
    }

    #[test]
    fn test_preset_conflicts_with_config() {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            generate: GenerateArgs,
        }
        let result =
            TestCli::try_parse_from(["test", "--preset", "core", "--config", "template.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generator_arg_requires_cmd() {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            generate: GenerateArgs,
        }
        let result = TestCli::try_parse_from(["test", "--generator-arg", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_spec_preset() {
        let tmp = TempDir::new().unwrap();
        let args = SpecArgs {
            preset: Some("viewer".to_string()),
            config: None,
        };

        let spec = resolve_spec(tmp.path(), &args).unwrap();
        assert_eq!(spec, pkgsmith::core::presets::viewer());
    }

    #[test]
    fn test_resolve_spec_unknown_preset() {
        let tmp = TempDir::new().unwrap();
        let args = SpecArgs {
            preset: Some("nope".to_string()),
            config: None,
        };

        let err = resolve_spec(tmp.path(), &args).unwrap_err();
        assert!(err.to_string().contains("unknown preset `nope`"));
    }

    #[test]
    fn test_resolve_spec_from_root() {
        let tmp = TempDir::new().unwrap();
        let toml = pkgsmith::core::presets::core().to_toml_string().unwrap();
        std::fs::write(tmp.path().join(SPEC_FILE), toml).unwrap();

        let args = SpecArgs {
            preset: None,
            config: None,
        };
        let spec = resolve_spec(tmp.path(), &args).unwrap();
        assert_eq!(spec, pkgsmith::core::presets::core());
    }

    #[test]
    fn test_resolve_spec_explicit_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("other.toml");
        std::fs::write(&path, "[package]\nkind = \"application\"\n").unwrap();

        let args = SpecArgs {
            preset: None,
            config: Some(path),
        };
        let spec = resolve_spec(tmp.path(), &args).unwrap();
        assert_eq!(spec.kind, pkgsmith::core::PackageType::Application);
    }

    #[test]
    fn test_resolve_spec_missing() {
        let tmp = TempDir::new().unwrap();
        let args = SpecArgs {
            preset: None,
            config: None,
        };

        let err = resolve_spec(tmp.path(), &args).unwrap_err();
        assert!(err.to_string().contains("no `template.toml` found"));
    }
}
