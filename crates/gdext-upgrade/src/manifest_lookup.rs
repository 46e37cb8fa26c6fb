//! Locating the plugin's `.gdextension` manifest

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use gdext_config::layout::{is_manifest_file_name, SUBMODULE_DIR};
use gdext_config::ProjectLayout;
use gdext_logger as logger;
use walkdir::{DirEntry, WalkDir};

/// Find the manifest for `plugin_id`: the fixed candidates first, then a
/// walk of the whole project that never enters a `godot-cpp` directory.
pub fn find_manifest(layout: &ProjectLayout, plugin_id: &str) -> Option<PathBuf> {
    if let Some(candidate) = layout
        .manifest_candidates(plugin_id)
        .into_iter()
        .find(|candidate| candidate.is_file())
    {
        return Some(candidate);
    }

    logger::debug(&format!(
        "No manifest at the standard locations for '{}', searching {}",
        plugin_id,
        layout.root().display()
    ));
    search_manifest(layout.root())
}

/// Depth-first walk from `root`. Inside each directory, files are visited
/// before subdirectories and both in file-name order, so the first match is
/// stable across platforms.
pub fn search_manifest(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by(files_first_by_name)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_submodule_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                logger::debug(&format!("Skipping unreadable entry: {}", e));
                None
            }
        })
        .find(|entry| {
            is_regular_file(entry) && entry.file_name().to_str().is_some_and(is_manifest_file_name)
        })
        .map(DirEntry::into_path)
}

/// Regular files, including symlinks that resolve to one. Links are never
/// followed into directories.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn files_first_by_name(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_submodule_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == SUBMODULE_DIR
}
