use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Row identifier of a registered program (one monitored log folder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(i64);

impl ProgramId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProgramId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Display name of a program derived from its log folder (the folder's base name).
///
/// Falls back to the full path text when the path has no final component
/// (e.g. `/` or `..`).
pub fn program_name_from_folder(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| folder.to_string_lossy().to_string())
}
