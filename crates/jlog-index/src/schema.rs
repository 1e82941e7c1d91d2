use rusqlite::Connection;

use crate::{Error, Result};

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Storage layout
//
// - programs.log_folder_path is the natural key used by discovery (UNIQUE)
// - entries keep the verbatim source line; (session_id, seq) preserves file order
// - sessions.is_archived flips to 1 only after the archive is durable on disk
// - retention columns are written by operators and read by an external sweep

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != 0 && current_version != SCHEMA_VERSION {
        return Err(Error::SchemaVersion {
            found: current_version,
            expected: SCHEMA_VERSION,
        });
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS programs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            log_folder_path TEXT NOT NULL UNIQUE,
            archive_after_days INTEGER,
            delete_after_days INTEGER
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            program_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            source_path TEXT,
            has_warning BOOLEAN NOT NULL DEFAULT 0,
            has_error BOOLEAN NOT NULL DEFAULT 0,
            has_fatal BOOLEAN NOT NULL DEFAULT 0,
            is_archived BOOLEAN NOT NULL DEFAULT 0,
            FOREIGN KEY (program_id) REFERENCES programs(id)
        );

        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id INTEGER NOT NULL,
            seq INTEGER NOT NULL,
            log_entry TEXT NOT NULL,
            FOREIGN KEY (session_id) REFERENCES sessions(id),
            UNIQUE (session_id, seq)
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_program ON sessions(program_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_created ON sessions(created_at DESC);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}
