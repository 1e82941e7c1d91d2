use jlog_types::{ProgramId, SessionFlags, SessionId};
use serde::Serialize;

/// Program record from the store.
///
/// One row per log folder discovered under the configured root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramRecord {
    pub id: ProgramId,
    /// Display name (base name of the log folder).
    pub name: String,
    /// Absolute folder path; unique across programs.
    pub log_folder_path: String,
    /// Retention policy, read by an external sweep.
    pub archive_after_days: Option<i64>,
    pub delete_after_days: Option<i64>,
}

/// One ingested log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub program_id: ProgramId,
    /// RFC 3339 creation time of the source file (or ingestion time).
    pub created_at: String,
    /// Path the session was ingested from.
    pub source_path: Option<String>,
    #[serde(flatten)]
    pub flags: SessionFlags,
    /// Set once the source has a durable archive copy.
    pub is_archived: bool,
}

/// A verbatim source line, ordered within its session by `seq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    pub id: i64,
    pub session_id: SessionId,
    pub seq: i64,
    pub log_entry: String,
}
