//! Fatal upgrade errors
//!
//! Only conditions that must abort the run live here. Anything the upgrade
//! can continue past is reported as a [`crate::steps::StepOutcome::Warning`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpgradeError {
    #[error("plugin root not found: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("submodule initialisation failed: `{command}` exited with {}", exit_code_label(.code))]
    SubmoduleInit { command: String, code: Option<i32> },

    #[error("failed to checkout {branch}: {detail}")]
    BranchReset { branch: String, detail: String },
}

impl UpgradeError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}
