//! `pkgsmith presets` command
//!
//! Lists the built-in presets, or prints one as `template.toml` so it can
//! be saved and edited.

use anyhow::{Context, Result};

use crate::cli::PresetsArgs;
use pkgsmith::core::presets::{preset, PRESETS};

pub fn execute(args: PresetsArgs) -> Result<()> {
    match args.name {
        None => {
            for (name, description) in PRESETS {
                println!("{:<10} {}", name, description);
            }
        }
        Some(name) => {
            let spec = preset(&name)?;
            let toml = spec
                .to_toml_string()
                .with_context(|| format!("failed to render preset `{}`", name))?;
            print!("{}", toml);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_preset_errors() {
        let err = execute(PresetsArgs {
            name: Some("missing".to_string()),
        })
        .unwrap_err();
        assert!(err.to_string().contains("unknown preset"));
    }
}
