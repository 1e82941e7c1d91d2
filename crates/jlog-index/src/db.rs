use std::collections::HashSet;
use std::path::Path;

use jlog_types::{ProgramId, SessionFlags, SessionId};
use rusqlite::Connection;

use crate::records::{EntryRecord, ProgramRecord, SessionRecord};
use crate::store::{SessionStore, SessionTransaction};
use crate::{Result, queries, schema};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    // Program operations

    pub fn list_known_program_paths(&self) -> Result<HashSet<String>> {
        queries::program::known_paths(&self.conn)
    }

    pub fn insert_program(&self, name: &str, log_folder_path: &str) -> Result<ProgramId> {
        queries::program::insert(&self.conn, name, log_folder_path)
    }

    pub fn get_program(&self, id: ProgramId) -> Result<Option<ProgramRecord>> {
        queries::program::get(&self.conn, id)
    }

    pub fn list_programs(&self) -> Result<Vec<ProgramRecord>> {
        queries::program::list(&self.conn)
    }

    // Session operations

    /// Start a unit of work; see [`SessionTransaction`].
    pub fn begin_session(&self) -> Result<SessionTransaction<'_>> {
        SessionTransaction::begin(&self.conn)
    }

    pub fn get_session(&self, id: SessionId) -> Result<Option<SessionRecord>> {
        queries::session::get(&self.conn, id)
    }

    pub fn list_sessions(&self, program_id: Option<ProgramId>) -> Result<Vec<SessionRecord>> {
        queries::session::list(&self.conn, program_id)
    }

    // Entry operations

    pub fn list_entries(&self, session_id: SessionId) -> Result<Vec<EntryRecord>> {
        queries::entry::list(&self.conn, session_id)
    }

    pub fn count_entries(&self, session_id: SessionId) -> Result<usize> {
        queries::entry::count(&self.conn, session_id)
    }
}

impl SessionStore for Database {
    fn create_session(
        &self,
        program_id: ProgramId,
        created_at: &str,
        source_path: &str,
    ) -> Result<SessionId> {
        queries::session::insert(&self.conn, program_id, created_at, source_path)
    }

    fn update_session_flags(&self, session_id: SessionId, flags: SessionFlags) -> Result<()> {
        queries::session::update_flags(&self.conn, session_id, flags)
    }

    fn insert_entry(&self, session_id: SessionId, raw_line: &str) -> Result<()> {
        queries::entry::insert(&self.conn, session_id, raw_line)
    }

    fn mark_session_archived(&self, session_id: SessionId) -> Result<()> {
        queries::session::mark_archived(&self.conn, session_id)
    }
}
