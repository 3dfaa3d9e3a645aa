//! Running generator subprocesses.

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Failure to run a subprocess at all. A non-zero exit is not an error here.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write input to `{program}`")]
    Input {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for `{program}`")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// A command line plus the environment it runs in.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    cwd: Option<PathBuf>,
    input: Option<Vec<u8>>,
}

impl ProcessBuilder {
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
            cwd: None,
            input: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Bytes written to the child's stdin; without this stdin is `/dev/null`.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.input = Some(data.into());
        self
    }

    /// Run to completion, capturing stdout and stderr.
    pub fn exec(&self) -> Result<ProcessOutput, ProcessError> {
        let program = self.program.display().to_string();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(match self.input {
                Some(_) => Stdio::piped(),
                None => Stdio::null(),
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

        if let (Some(data), Some(mut stdin)) = (&self.input, child.stdin.take()) {
            // The child may exit without reading its input.
            match stdin.write_all(data) {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                    return Err(ProcessError::Input { program, source: e });
                }
                _ => {}
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|source| ProcessError::Wait { program, source })?;

        Ok(ProcessOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Shell-like rendering for logs and error messages.
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Look `name` up on PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("node").args(["gen.js", "--out", ".template"]);

        assert_eq!(pb.display_command(), "node gen.js --out .template");
    }

    #[test]
    fn test_spawn_failure() {
        let err = ProcessBuilder::new("/nonexistent/pkgsmith-generator")
            .exec()
            .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_pipes_stdin() {
        let output = ProcessBuilder::new("cat").stdin("hello").exec().unwrap();

        assert!(output.status.success());
        assert_eq!(output.stdout, "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_env_and_cwd() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = ProcessBuilder::new("sh")
            .args(["-c", "printf '%s' \"$GREETING\"; pwd >&2"])
            .env("GREETING", "hi")
            .cwd(tmp.path())
            .exec()
            .unwrap();

        assert_eq!(output.stdout, "hi");
        assert!(!output.stderr.trim().is_empty());
    }
}
