//! godot-cpp submodule: initialise, switch branch, sync

use gdext_config::ProjectLayout;
use gdext_logger as logger;

use super::StepOutcome;
use crate::errors::UpgradeError;
use crate::git::Git;

/// Run `git submodule update --init --recursive` unless godot-cpp is
/// already a checkout. Failure to initialise is fatal.
pub fn ensure_initialized(
    layout: &ProjectLayout,
    git: &Git<'_>,
) -> Result<StepOutcome, UpgradeError> {
    if layout.is_submodule_initialized() {
        return Ok(StepOutcome::success("godot-cpp submodule already initialised"));
    }

    logger::progress("godot-cpp submodule not initialised, initialising now...");
    let spec = git.submodule_init_spec(layout.root());
    let output = git.run(&spec).map_err(|source| UpgradeError::Spawn {
        command: spec.to_string(),
        source,
    })?;

    if !output.is_success() {
        return Err(UpgradeError::SubmoduleInit {
            command: spec.to_string(),
            code: output.code,
        });
    }

    Ok(StepOutcome::success("Submodule initialised"))
}

/// Fetch, force-reset onto `origin/<branch>`, pull and report the head
/// commit. Only the reset is fatal.
pub fn switch_branch(
    layout: &ProjectLayout,
    git: &Git<'_>,
    branch: &str,
) -> Result<Vec<StepOutcome>, UpgradeError> {
    let checkout = layout.submodule_dir();
    let mut outcomes = Vec::new();

    logger::spinner_start("Fetching latest remote branches...");
    let fetched = git.run(&git.fetch_all_spec(&checkout));
    logger::spinner_stop();
    match fetched {
        Ok(output) if output.is_success() => logger::debug("Fetch finished"),
        Ok(output) => outcomes.push(StepOutcome::warning(format!(
            "fetch may have had issues: {}",
            output.detail()
        ))),
        Err(e) => outcomes.push(StepOutcome::warning(format!("could not run git fetch: {}", e))),
    }

    logger::progress(&format!("Checking out {} branch on godot-cpp...", branch));
    let reset = git.checkout_reset_spec(&checkout, branch);
    match git.run(&reset) {
        Ok(output) if output.is_success() => {}
        Ok(output) => {
            return Err(UpgradeError::BranchReset {
                branch: branch.to_string(),
                detail: output.detail(),
            })
        }
        Err(e) => {
            return Err(UpgradeError::BranchReset {
                branch: branch.to_string(),
                detail: format!("could not run `{}`: {}", reset, e),
            })
        }
    }

    logger::spinner_start("Pulling latest changes...");
    let pulled = git.run(&git.pull_spec(&checkout));
    logger::spinner_stop();
    match pulled {
        Ok(output) if output.is_success() => logger::debug("Pull finished"),
        Ok(output) => outcomes.push(StepOutcome::warning(format!(
            "pull may have been unnecessary or failed: {}",
            output.detail()
        ))),
        Err(e) => outcomes.push(StepOutcome::warning(format!("could not run git pull: {}", e))),
    }

    let head = match git.run(&git.last_commit_spec(&checkout)) {
        Ok(output) if output.is_success() => {
            let summary = output.stdout.trim();
            if summary.is_empty() {
                "(no commit summary)".to_string()
            } else {
                summary.to_string()
            }
        }
        Ok(output) => format!("(git log failed: {})", output.detail()),
        Err(e) => format!("(git log failed: {})", e),
    };
    outcomes.push(StepOutcome::success(format!("godot-cpp is now at: {}", head)));

    Ok(outcomes)
}

/// `git submodule sync` so the parent repository picks up `.gitmodules`
pub fn sync(layout: &ProjectLayout, git: &Git<'_>) -> StepOutcome {
    match git.run(&git.submodule_sync_spec(layout.root())) {
        Ok(output) if output.is_success() => StepOutcome::success("Submodule sync done"),
        Ok(output) => StepOutcome::warning(format!(
            "submodule sync may have failed: {}",
            output.detail()
        )),
        Err(e) => StepOutcome::warning(format!("could not run git submodule sync: {}", e)),
    }
}
