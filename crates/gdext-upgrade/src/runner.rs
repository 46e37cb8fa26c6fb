//! External command execution
//!
//! Every subprocess the upgrade launches goes through [`CommandRunner`], so
//! the steps can be driven by a scripted runner in tests and by
//! [`SystemRunner`] in the binary.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use gdext_logger as logger;
use tracing::debug;

/// A fully described command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Capture stdout/stderr instead of streaming them to the terminal
    pub capture: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            capture: true,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Stream output straight to the terminal
    pub fn inherit_output(mut self) -> Self {
        self.capture = false;
        self
    }

    /// Program file name without its directory, e.g. `git`
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program_name())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Trimmed stderr, falling back to stdout when stderr is empty
    pub fn detail(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Executes commands and blocks until they finish
pub trait CommandRunner {
    /// Run `spec` to completion. `Err` means the process could not be
    /// spawned at all; a non-zero exit is reported through [`CommandOutput`].
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput>;
}

/// Runs commands with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        debug!(cwd = %spec.cwd.display(), capture = spec.capture, "Running: {}", spec);

        let mut command = Command::new(&spec.program);
        command.args(&spec.args).current_dir(&spec.cwd);

        if spec.capture {
            let output = command.stdin(Stdio::null()).output()?;
            logger::capture_output(&spec.to_string(), &output);
            Ok(CommandOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let status = command.status()?;
            logger::capture_streams(&spec.to_string(), status.code(), "", "");
            Ok(CommandOutput {
                code: status.code(),
                ..CommandOutput::default()
            })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_program_file_name() {
        let spec = CommandSpec::new("/usr/bin/git", "/tmp").args(["fetch", "--all"]);
        assert_eq!(spec.to_string(), "git fetch --all");
        assert!(spec.capture);
        assert!(!spec.clone().inherit_output().capture);
    }

    #[test]
    fn test_detail_prefers_stderr() {
        let out = CommandOutput::failure(1, "  fatal: bad ref \n").with_stdout("ignored");
        assert_eq!(out.detail(), "fatal: bad ref");

        let out = CommandOutput::failure(1, "").with_stdout("stdout only\n");
        assert_eq!(out.detail(), "stdout only");
    }

    #[test]
    fn test_signal_termination_is_not_success() {
        let out = CommandOutput {
            code: None,
            ..CommandOutput::default()
        };
        assert!(!out.is_success());
        assert!(CommandOutput::success().is_success());
    }

    #[test]
    #[cfg(unix)]
    fn test_system_runner_reports_exit_code() {
        let Ok(cwd) = std::env::current_dir() else {
            return;
        };
        let spec = CommandSpec::new("sh", &cwd).args(["-c", "echo out; echo err >&2; exit 3"]);
        let Ok(out) = SystemRunner.run(&spec) else {
            return;
        };
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }

    #[test]
    fn test_system_runner_spawn_error() {
        let Ok(cwd) = std::env::current_dir() else {
            return;
        };
        let spec = CommandSpec::new("gdext-upgrade-missing-program-1234", cwd);
        assert!(SystemRunner.run(&spec).is_err());
    }
}
