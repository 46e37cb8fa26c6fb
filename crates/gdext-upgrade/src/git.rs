//! Thin wrapper over the git CLI invocations the upgrade needs

use std::io;
use std::path::{Path, PathBuf};

use crate::runner::{CommandOutput, CommandRunner, CommandSpec};

pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    program: PathBuf,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    fn command(&self, cwd: &Path, args: &[&str]) -> CommandSpec {
        CommandSpec::new(&self.program, cwd).args(args.iter().copied())
    }

    /// `git submodule update --init --recursive`, streamed to the terminal
    pub fn submodule_init_spec(&self, root: &Path) -> CommandSpec {
        self.command(root, &["submodule", "update", "--init", "--recursive"])
            .inherit_output()
    }

    pub fn fetch_all_spec(&self, checkout: &Path) -> CommandSpec {
        self.command(checkout, &["fetch", "--all"])
    }

    /// Force-create or reset `branch` to track `origin/<branch>`
    pub fn checkout_reset_spec(&self, checkout: &Path, branch: &str) -> CommandSpec {
        let upstream = format!("origin/{}", branch);
        self.command(checkout, &["checkout", "-B", branch, upstream.as_str()])
    }

    pub fn pull_spec(&self, checkout: &Path) -> CommandSpec {
        self.command(checkout, &["pull"])
    }

    pub fn last_commit_spec(&self, checkout: &Path) -> CommandSpec {
        self.command(checkout, &["log", "--oneline", "-1"])
    }

    pub fn submodule_sync_spec(&self, root: &Path) -> CommandSpec {
        self.command(root, &["submodule", "sync"])
    }

    pub fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        self.runner.run(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::SystemRunner;

    #[test]
    fn test_checkout_reset_targets_origin() {
        let git = Git::new(&SystemRunner, "git");
        let spec = git.checkout_reset_spec(Path::new("/p/godot-cpp"), "master");
        assert_eq!(spec.to_string(), "git checkout -B master origin/master");
        assert_eq!(spec.cwd(), Path::new("/p/godot-cpp"));
        assert!(spec.capture);
    }

    #[test]
    fn test_submodule_init_streams_output() {
        let git = Git::new(&SystemRunner, "/usr/bin/git");
        let spec = git.submodule_init_spec(Path::new("/p"));
        assert_eq!(spec.to_string(), "git submodule update --init --recursive");
        assert!(!spec.capture);
    }
}
