//! Common types and utilities shared across modules

use clap::Args;

/// Output options available on every invocation
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, help = "Only print warnings and errors")]
    pub quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
