//! gdext-upgrade library - the upgrade steps behind the binary
//!
//! Exposed as a library so the steps can be tested without spawning the CLI.

pub mod cli;
pub mod common;
pub mod edits;
pub mod errors;
pub mod git;
pub mod manifest_lookup;
pub mod runner;
pub mod steps;
pub mod summary;
pub mod upgrade;

pub use common::GlobalOpts;
pub use errors::UpgradeError;
pub use upgrade::{run_upgrade, Toolchain, UpgradeOptions, UpgradeReport};
