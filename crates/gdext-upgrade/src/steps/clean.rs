use std::path::Path;

use gdext_config::ProjectLayout;
use gdext_logger as logger;

use super::StepOutcome;
use crate::runner::{CommandRunner, CommandSpec};

/// `scons -c` in the project root. Never fatal.
pub fn clean_build(layout: &ProjectLayout, runner: &dyn CommandRunner, scons: &Path) -> StepOutcome {
    let spec = CommandSpec::new(scons, layout.root())
        .args(["-c"])
        .inherit_output();

    logger::progress(&format!("Cleaning old build files ({})...", spec));
    match runner.run(&spec) {
        Ok(output) if output.is_success() => StepOutcome::success("Old build files cleaned"),
        Ok(output) => StepOutcome::warning(format!(
            "{} returned a non-zero exit code ({:?})",
            spec, output.code
        )),
        Err(e) => StepOutcome::warning(format!("could not run {}: {}", spec, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::ScriptedRunner;
    use crate::runner::CommandOutput;
    use std::io;

    #[test]
    fn test_clean_runs_scons_in_root() {
        let runner = ScriptedRunner::succeeding();
        let layout = ProjectLayout::new("/work/plugin");

        let outcome = clean_build(&layout, &runner, Path::new("/usr/bin/scons"));
        assert!(!outcome.is_warning());
        assert_eq!(runner.calls(), vec!["scons -c"]);
        assert_eq!(runner.specs()[0].cwd(), Path::new("/work/plugin"));
    }

    #[test]
    fn test_clean_failure_only_warns() {
        let runner = ScriptedRunner::with(|_| Ok(CommandOutput::failure(2, "")));
        let layout = ProjectLayout::new("/work/plugin");
        assert!(clean_build(&layout, &runner, Path::new("scons")).is_warning());

        let runner = ScriptedRunner::with(|_| Err(io::Error::new(io::ErrorKind::NotFound, "no scons")));
        assert!(clean_build(&layout, &runner, Path::new("scons")).is_warning());
    }
}
