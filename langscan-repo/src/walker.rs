//! Local directory traversal
//!
//! Depth-first walk producing `FileRecord`s, pruning dependency, build,
//! hidden, and test directories during traversal rather than filtering
//! afterwards.

use langscan_core::{FileRecord, LangscanResult};
use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Whether a directory should be pruned (not descended into).
fn is_pruned_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || name.contains("node_modules")
        || name.contains("dist")
        || name.contains("tests")
        || name.contains("test")
}

/// Recursively list files under `root`.
///
/// Fails if `root` does not exist or is not readable; unreadable entries
/// below it are skipped. Paths in the returned records are relative to
/// `root` and `/`-separated.
pub fn walk_directory(root: &Path) -> LangscanResult<Vec<FileRecord>> {
    // Surface a missing or unreadable root as an IO error up front
    let root_meta = std::fs::metadata(root)?;
    if !root_meta.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("{} is not a directory", root.display()),
        )
        .into());
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_pruned_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "Skipping unstatable file");
                continue;
            }
        };

        let relative = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        let path = relative.to_string_lossy().replace('\\', "/");
        files.push(FileRecord::new(path, metadata.len()));
    }

    debug!(root = %root.display(), files = files.len(), "Directory walk complete");
    Ok(files)
}
