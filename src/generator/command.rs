//! Delegates generation to an external program.
//!
//! The program runs in the package root with the template serialized as
//! JSON on stdin, and `PKGSMITH_TEMPLATE_DIR` pointing at the directory the
//! copy step reads from.

use std::path::PathBuf;

use super::{GenerateTemplate, GeneratorError};
use crate::core::{Template, TEMPLATE_DIR};
use crate::util::fs::normalize_path;
use crate::util::process::{find_executable, ProcessBuilder};

/// Runs an external generator program.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    display: String,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        CommandGenerator {
            display: program.clone(),
            program,
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self.display = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        self
    }

    fn resolve_program(&self) -> Result<PathBuf, GeneratorError> {
        let as_path = PathBuf::from(&self.program);
        if as_path.components().count() > 1 {
            return Ok(as_path);
        }
        find_executable(&self.program).ok_or_else(|| {
            GeneratorError::new(format!("generator program `{}` not found in PATH", self.program))
        })
    }
}

impl GenerateTemplate for CommandGenerator {
    fn name(&self) -> &str {
        &self.display
    }

    fn generate(&self, template: &Template) -> Result<(), GeneratorError> {
        let program = self.resolve_program()?;
        let input = serde_json::to_vec(template)
            .map_err(|e| GeneratorError::with_source("failed to serialize template", e))?;

        let template_dir = normalize_path(&template.path).join(TEMPLATE_DIR);
        let process = ProcessBuilder::new(&program)
            .args(&self.args)
            .cwd(&template.path)
            .env("PKGSMITH_TEMPLATE_DIR", &template_dir)
            .stdin(input);

        tracing::debug!("running `{}`", process.display_command());
        let output = process
            .exec()
            .map_err(|e| {
                GeneratorError::with_source(format!("failed to run `{}`", self.display), e)
            })?;

        if !output.status.success() {
            return Err(GeneratorError::new(format!(
                "`{}` failed with exit code {:?}\n{}",
                self.display,
                output.status.code(),
                output.stderr.trim_end()
            )));
        }

        for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::info!("{}: {}", self.program, line);
        }
        Ok(())
    }
}
