use gdext_config::ProjectLayout;

use super::{read_project_file, write_project_file, StepOutcome};
use crate::edits::{rewrite_version_marker, MarkerEdit};

/// Result of the version-marker step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStep {
    pub outcome: StepOutcome,
    /// Plugin identifier for the manifest lookup, if one could be read
    pub plugin_id: Option<String>,
}

/// Overwrite line 2 of `dont_touch.txt` with `version` and hand back the
/// plugin identifier from line 1.
pub fn update_version_marker(layout: &ProjectLayout, version: &str) -> MarkerStep {
    let path = layout.version_marker_path();
    let content = match read_project_file(&path, "version update") {
        Ok(content) => content,
        Err(outcome) => {
            return MarkerStep {
                outcome,
                plugin_id: None,
            }
        }
    };

    match rewrite_version_marker(&content, version) {
        MarkerEdit::TooShort { plugin_id } => MarkerStep {
            outcome: StepOutcome::warning(format!(
                "{} has fewer than 2 lines, skipping version update",
                path.display()
            )),
            plugin_id,
        },
        MarkerEdit::Rewritten { content, plugin_id } => {
            if let Err(outcome) = write_project_file(&path, &content) {
                return MarkerStep { outcome, plugin_id };
            }
            let plugin = plugin_id.as_deref().unwrap_or("<unnamed>");
            MarkerStep {
                outcome: StepOutcome::success(format!(
                    "dont_touch.txt updated: version -> {}  (plugin: {})",
                    version, plugin
                )),
                plugin_id,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_marker_yields_no_plugin() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let layout = ProjectLayout::new(temp_dir.path());

        let step = update_version_marker(&layout, "4.6");
        assert!(step.outcome.is_warning());
        assert_eq!(step.plugin_id, None);
        assert!(!layout.version_marker_path().exists());
    }

    #[test]
    fn test_single_line_marker_left_byte_identical() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let layout = ProjectLayout::new(temp_dir.path());
        let original = b"  MyPlugin \n";
        let Ok(()) = fs::write(layout.version_marker_path(), original) else {
            return;
        };

        let step = update_version_marker(&layout, "4.6");
        assert!(step.outcome.is_warning());
        assert_eq!(step.plugin_id.as_deref(), Some("MyPlugin"));
        assert!(fs::read(layout.version_marker_path()).is_ok_and(|bytes| bytes == original));
    }

    #[test]
    fn test_two_line_marker_rewritten() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let layout = ProjectLayout::new(temp_dir.path());
        let Ok(()) = fs::write(layout.version_marker_path(), "MyPlugin\n4.5\n") else {
            return;
        };

        let step = update_version_marker(&layout, "4.6");
        assert!(!step.outcome.is_warning());
        assert_eq!(step.plugin_id.as_deref(), Some("myplugin"));
        assert!(fs::read_to_string(layout.version_marker_path())
            .is_ok_and(|content| content == "MyPlugin\n4.6\n"));
    }
}
