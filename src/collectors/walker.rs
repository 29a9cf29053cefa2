use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use walkdir::WalkDir;

/// A named directory found while walking the input tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDir {
    pub name: String,
    pub path: PathBuf,
}

/// Directory entries sorted by file name, so runs are reproducible
pub fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).context(format!("Failed to read directory: {}", dir.display()))? {
        let entry = entry.context(format!("Failed to read directory entry in {}", dir.display()))?;
        entries.push(entry.path());
    }
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Host folders of the input root; names starting with `excluded_prefix`
/// and plain files are ignored.
pub fn host_dirs(input_root: &Path, excluded_prefix: &str) -> Result<Vec<NamedDir>> {
    let mut hosts = Vec::new();
    for path in sorted_entries(input_root)? {
        if !path.is_dir() {
            continue;
        }
        let name = entry_name(&path);
        if !excluded_prefix.is_empty() && name.starts_with(excluded_prefix) {
            debug!("Skipping excluded host folder: {}", path.display());
            continue;
        }
        hosts.push(NamedDir { name, path });
    }
    Ok(hosts)
}

/// Subdirectories of a host folder that are walked as user directories
pub fn user_dirs<S: AsRef<str>>(host_dir: &Path, skip_folders: &[S]) -> Result<Vec<NamedDir>> {
    let mut users = Vec::new();
    for path in sorted_entries(host_dir)? {
        if !path.is_dir() {
            continue;
        }
        let name = entry_name(&path);
        if skip_folders.iter().any(|skip| skip.as_ref() == name) {
            debug!("Skipping reserved folder: {}", path.display());
            continue;
        }
        users.push(NamedDir { name, path });
    }
    Ok(users)
}

/// Regular files directly inside `dir` (symlinks to files included)
pub fn direct_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(dir)?.into_iter().filter(|path| path.is_file()).collect())
}

/// All regular files below `dir`, in sorted depth-first order.
///
/// Symlinks are not followed. Unreadable entries are logged and skipped.
pub fn walk_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
