use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::Result;

/// Creation time of a file, when the platform and filesystem report one.
pub fn file_created_at(path: &Path) -> Option<DateTime<Utc>> {
    let created = std::fs::metadata(path).ok()?.created().ok()?;
    Some(DateTime::<Utc>::from(created))
}

/// Every directory below `root` at any depth, excluding `root` itself.
pub fn list_subdirectories(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Every non-directory entry below `root` at any depth, sorted by path.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
