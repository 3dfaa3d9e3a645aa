//! `pkgsmith check` command

use anyhow::{bail, Result};

use super::generate::{package_root, resolve_spec};
use crate::cli::CheckArgs;
use pkgsmith::core::TEMPLATE_DIR;
use pkgsmith::ops::check;

pub fn execute(args: CheckArgs) -> Result<()> {
    let root = package_root(args.path)?;
    let spec = resolve_spec(&root, &args.spec)?;

    let report = check(&root, &spec.copy)?;

    for file in report.out_of_sync() {
        eprintln!("{:>22} {}", file.status.as_str(), file.path.display());
    }
    for path in &report.unlisted {
        tracing::info!("{}/{} is not in the copy list", TEMPLATE_DIR, path.display());
    }

    let stale = report.out_of_sync().count();
    if stale > 0 {
        bail!(
            "{} of {} files out of sync with {}\n\nhelp: run `pkgsmith generate` to refresh them",
            stale,
            report.files.len(),
            TEMPLATE_DIR
        );
    }

    eprintln!("     In sync {} files", report.files.len());
    Ok(())
}
