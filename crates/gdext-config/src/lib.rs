//! Layout and configuration shared by the gdext-upgrade crates
//!
//! - [`layout`]: fixed file and directory names of a GDExtension plugin project
//! - [`settings`]: optional TOML settings file and external tool resolution

pub mod errors;
pub mod layout;
pub mod settings;

pub use errors::ConfigError;
pub use layout::ProjectLayout;
pub use settings::Settings;
