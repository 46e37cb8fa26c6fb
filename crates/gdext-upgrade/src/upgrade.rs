//! Runs the upgrade steps in order
//!
//! Steps are best-effort: a warning never stops the run. Only the errors in
//! [`UpgradeError`] abort, and they do so immediately.

use std::path::PathBuf;

use gdext_config::settings::DEFAULT_COMPATIBILITY_MINIMUM;
use gdext_config::{ProjectLayout, Settings};
use gdext_logger as logger;

use crate::errors::UpgradeError;
use crate::git::Git;
use crate::runner::CommandRunner;
use crate::steps::{
    clean::clean_build, gitmodules::update_gitmodules, manifest::update_manifest, submodule,
    version_marker::update_version_marker, StepOutcome,
};

/// What the operator asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeOptions {
    pub root: PathBuf,
    pub compatibility_minimum: String,
    pub clean: bool,
}

impl UpgradeOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            compatibility_minimum: DEFAULT_COMPATIBILITY_MINIMUM.to_string(),
            clean: true,
        }
    }
}

/// External programs and upgrade targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub git: PathBuf,
    pub scons: PathBuf,
    pub target_branch: String,
    pub target_version: String,
}

impl Toolchain {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            git: settings.git_program(),
            scons: settings.scons_program(),
            target_branch: settings.target_branch().to_string(),
            target_version: settings.target_version().to_string(),
        }
    }
}

/// Everything the steps reported, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    pub outcomes: Vec<StepOutcome>,
    pub plugin_id: Option<String>,
    pub manifest_path: Option<PathBuf>,
}

impl UpgradeReport {
    fn record(&mut self, outcome: StepOutcome) {
        outcome.log();
        self.outcomes.push(outcome);
    }

    pub fn warnings(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_warning()).count()
    }
}

pub fn run_upgrade(
    options: &UpgradeOptions,
    toolchain: &Toolchain,
    runner: &dyn CommandRunner,
) -> Result<UpgradeReport, UpgradeError> {
    if !options.root.is_dir() {
        return Err(UpgradeError::InvalidRoot(options.root.clone()));
    }

    let layout = ProjectLayout::new(&options.root);
    let git = Git::new(runner, &toolchain.git);
    let mut report = UpgradeReport::default();

    logger::step("submodule init");
    report.record(submodule::ensure_initialized(&layout, &git)?);

    logger::step("branch switch");
    for outcome in submodule::switch_branch(&layout, &git, &toolchain.target_branch)? {
        report.record(outcome);
    }

    logger::step(".gitmodules");
    report.record(update_gitmodules(&layout, &toolchain.target_branch));

    logger::step("submodule sync");
    report.record(submodule::sync(&layout, &git));

    logger::step("dont_touch.txt");
    let marker = update_version_marker(&layout, &toolchain.target_version);
    report.record(marker.outcome);
    report.plugin_id = marker.plugin_id;

    match report.plugin_id.clone() {
        Some(plugin_id) => {
            logger::step(".gdextension");
            let manifest = update_manifest(&layout, &plugin_id, &options.compatibility_minimum);
            report.record(manifest.outcome);
            report.manifest_path = manifest.path;
        }
        None => logger::debug("No plugin identifier, skipping .gdextension update"),
    }

    if options.clean {
        logger::step("scons clean");
        report.record(clean_build(&layout, runner, &toolchain.scons));
    } else {
        logger::debug("Skipping build clean (--no-clean)");
    }

    Ok(report)
}
