use gdext_config::ProjectLayout;

use super::{read_project_file, write_project_file, StepOutcome};
use crate::edits::set_submodule_branch;

/// Point the `branch =` entries of `.gitmodules` at `branch`
pub fn update_gitmodules(layout: &ProjectLayout, branch: &str) -> StepOutcome {
    let path = layout.gitmodules_path();
    let content = match read_project_file(&path, ".gitmodules update") {
        Ok(content) => content,
        Err(outcome) => return outcome,
    };

    let updated = set_submodule_branch(&content, branch);
    if let Err(outcome) = write_project_file(&path, &updated) {
        return outcome;
    }

    StepOutcome::success(format!(".gitmodules updated: branch = {}", branch))
}
