//! Optional settings file
//!
//! Looked up at `~/.config/gdext-upgrade/config.toml` unless
//! `GDEXT_UPGRADE_CONFIG` points elsewhere. Every key is optional:
//!
//! ```toml
//! git-path = "/usr/bin/git"
//! scons-path = "/opt/scons/bin/scons"
//! target-branch = "master"
//! target-version = "4.6"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use which::which;

use crate::errors::ConfigError;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "GDEXT_UPGRADE_CONFIG";

/// godot-cpp branch tracking the targeted Godot release
pub const DEFAULT_TARGET_BRANCH: &str = "master";

/// Version written to line 2 of the version-marker file
pub const DEFAULT_TARGET_VERSION: &str = "4.6";

/// Default `compatibility_minimum` written to the manifest
pub const DEFAULT_COMPATIBILITY_MINIMUM: &str = "4.6";

const GIT_PROGRAM: &str = "git";
const SCONS_PROGRAM: &str = "scons";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub git_path: Option<String>,
    pub scons_path: Option<String>,
    pub target_branch: Option<String>,
    pub target_version: Option<String>,
}

impl Settings {
    /// Resolve the settings file location, honoring `GDEXT_UPGRADE_CONFIG`
    pub fn path() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let default = dirs::home_dir().map(|home| {
            home.join(".config")
                .join("gdext-upgrade")
                .join("config.toml")
        });

        #[cfg(target_os = "windows")]
        let default = dirs::config_dir().map(|dir| dir.join("gdext-upgrade").join("config.toml"));

        default
    }

    /// Load settings from the default location; a missing file yields defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn target_branch(&self) -> &str {
        self.target_branch
            .as_deref()
            .unwrap_or(DEFAULT_TARGET_BRANCH)
    }

    pub fn target_version(&self) -> &str {
        self.target_version
            .as_deref()
            .unwrap_or(DEFAULT_TARGET_VERSION)
    }

    /// Path of the git client to invoke
    pub fn git_program(&self) -> PathBuf {
        resolve_program(self.git_path.as_deref(), GIT_PROGRAM)
    }

    /// Path of the SCons client to invoke
    pub fn scons_program(&self) -> PathBuf {
        resolve_program(self.scons_path.as_deref(), SCONS_PROGRAM)
    }
}

/// Prefer the configured path, then a `PATH` lookup, then the bare name so
/// the spawn error surfaces at the step that needs the tool.
fn resolve_program(configured: Option<&str>, program: &str) -> PathBuf {
    if let Some(path) = configured.map(str::trim).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    match which(program) {
        Ok(path) => {
            debug!("Using {} at {}", program, path.display());
            path
        }
        Err(e) => {
            debug!("{} not found on PATH: {}", program, e);
            PathBuf::from(program)
        }
    }
}
