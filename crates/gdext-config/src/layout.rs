//! Fixed directory layout of a GDExtension plugin project
//!
//! ```text
//! <root>/
//!   .gitmodules                          module-mapping file
//!   dont_touch.txt                       version-marker file
//!   godot-cpp/.git                       nested checkout marker (dir or file)
//!   test_project/<id>/<id>.gdextension   first manifest candidate
//!   <id>/<id>.gdextension                second manifest candidate
//! ```

use std::path::{Path, PathBuf};

/// Directory name of the vendored godot-cpp submodule
pub const SUBMODULE_DIR: &str = "godot-cpp";

/// Entry inside a checkout that marks it as initialized
pub const GIT_MARKER: &str = ".git";

/// Module-mapping file at the project root
pub const GITMODULES_FILE: &str = ".gitmodules";

/// Two-line version-marker file at the project root
pub const VERSION_MARKER_FILE: &str = "dont_touch.txt";

/// Directory holding the demo Godot project
pub const TEST_PROJECT_DIR: &str = "test_project";

/// Suffix of the extension-manifest file
pub const MANIFEST_SUFFIX: &str = ".gdextension";

/// Paths of one plugin project rooted at `root`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn submodule_dir(&self) -> PathBuf {
        self.root.join(SUBMODULE_DIR)
    }

    /// The submodule counts as initialized when `.git` exists as either a
    /// directory (plain clone) or a file (gitdir pointer).
    pub fn is_submodule_initialized(&self) -> bool {
        let marker = self.submodule_dir().join(GIT_MARKER);
        marker.is_dir() || marker.is_file()
    }

    pub fn gitmodules_path(&self) -> PathBuf {
        self.root.join(GITMODULES_FILE)
    }

    pub fn version_marker_path(&self) -> PathBuf {
        self.root.join(VERSION_MARKER_FILE)
    }

    /// Fixed manifest locations for a plugin, in lookup order
    pub fn manifest_candidates(&self, plugin_id: &str) -> [PathBuf; 2] {
        let file_name = manifest_file_name(plugin_id);
        [
            self.root
                .join(TEST_PROJECT_DIR)
                .join(plugin_id)
                .join(&file_name),
            self.root.join(plugin_id).join(&file_name),
        ]
    }
}

/// Whether `dir` looks like a plugin root (holds a version-marker file)
pub fn is_plugin_root(dir: &Path) -> bool {
    dir.join(VERSION_MARKER_FILE).is_file()
}

pub fn manifest_file_name(plugin_id: &str) -> String {
    format!("{}{}", plugin_id, MANIFEST_SUFFIX)
}

pub fn is_manifest_file_name(name: &str) -> bool {
    name.ends_with(MANIFEST_SUFFIX)
}
