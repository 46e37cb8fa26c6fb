use std::path::PathBuf;

use gdext_config::ProjectLayout;

use super::{read_project_file, write_project_file, StepOutcome};
use crate::edits::set_compatibility_minimum;
use crate::manifest_lookup::find_manifest;

/// Result of the manifest step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestStep {
    pub outcome: StepOutcome,
    /// Manifest that was located, whether or not the rewrite succeeded
    pub path: Option<PathBuf>,
}

/// Set `compatibility_minimum` in the plugin's `.gdextension` file
pub fn update_manifest(
    layout: &ProjectLayout,
    plugin_id: &str,
    compatibility_minimum: &str,
) -> ManifestStep {
    let Some(path) = find_manifest(layout, plugin_id) else {
        return ManifestStep {
            outcome: StepOutcome::warning("could not find a .gdextension file, skipping"),
            path: None,
        };
    };

    let outcome = match read_project_file(&path, ".gdextension update") {
        Ok(content) => {
            let updated = set_compatibility_minimum(&content, compatibility_minimum);
            match write_project_file(&path, &updated) {
                Ok(()) => {
                    let shown = path.strip_prefix(layout.root()).unwrap_or(&path);
                    StepOutcome::success(format!(
                        ".gdextension updated: compatibility_minimum = \"{}\"  ({})",
                        compatibility_minimum,
                        shown.display()
                    ))
                }
                Err(outcome) => outcome,
            }
        }
        Err(outcome) => outcome,
    };

    ManifestStep {
        outcome,
        path: Some(path),
    }
}
