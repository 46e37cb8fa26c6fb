//! The individual upgrade steps
//!
//! Every step reports a [`StepOutcome`]; only the fatal conditions of
//! [`crate::errors::UpgradeError`] travel through `Err`.

pub mod clean;
pub mod gitmodules;
pub mod manifest;
pub mod submodule;
pub mod version_marker;

use std::fs;
use std::io;
use std::path::Path;

use gdext_logger as logger;

/// Non-fatal result of a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success(String),
    Warning(String),
}

impl StepOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        StepOutcome::Success(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        StepOutcome::Warning(message.into())
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, StepOutcome::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            StepOutcome::Success(message) | StepOutcome::Warning(message) => message,
        }
    }

    /// Print the outcome to the console and the log file
    pub fn log(&self) {
        match self {
            StepOutcome::Success(message) => logger::success(message),
            StepOutcome::Warning(message) => logger::warn(message),
        }
    }
}

/// Read a project file, turning a failure into the warning the step reports
fn read_project_file(path: &Path, skipping: &str) -> Result<String, StepOutcome> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StepOutcome::warning(format!(
            "{} not found, skipping {}",
            path.display(),
            skipping
        )),
        _ => StepOutcome::warning(format!(
            "could not read {}: {}, skipping {}",
            path.display(),
            e,
            skipping
        )),
    })
}

fn write_project_file(path: &Path, content: &str) -> Result<(), StepOutcome> {
    fs::write(path, content)
        .map_err(|e| StepOutcome::warning(format!("could not write {}: {}", path.display(), e)))
}
