use jlog_types::{ProgramId, SessionFlags, SessionId};
use rusqlite::{Connection, Transaction};

use crate::{Result, queries};

/// Session-level writes used by the ingestor.
///
/// Implemented by [`crate::Database`] (each call autocommits) and by
/// [`SessionTransaction`] (nothing is visible until `commit`).
pub trait SessionStore {
    fn create_session(
        &self,
        program_id: ProgramId,
        created_at: &str,
        source_path: &str,
    ) -> Result<SessionId>;

    fn update_session_flags(&self, session_id: SessionId, flags: SessionFlags) -> Result<()>;

    fn insert_entry(&self, session_id: SessionId, raw_line: &str) -> Result<()>;

    fn mark_session_archived(&self, session_id: SessionId) -> Result<()>;
}

/// Unit of work covering one ingested file.
///
/// Dropping without [`commit`](Self::commit) rolls everything back.
pub struct SessionTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SessionTransaction<'conn> {
    pub(crate) fn begin(conn: &'conn Connection) -> Result<Self> {
        Ok(Self {
            tx: conn.unchecked_transaction()?,
        })
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }

    pub fn rollback(self) -> Result<()> {
        self.tx.rollback()?;
        Ok(())
    }
}

impl SessionStore for SessionTransaction<'_> {
    fn create_session(
        &self,
        program_id: ProgramId,
        created_at: &str,
        source_path: &str,
    ) -> Result<SessionId> {
        queries::session::insert(&self.tx, program_id, created_at, source_path)
    }

    fn update_session_flags(&self, session_id: SessionId, flags: SessionFlags) -> Result<()> {
        queries::session::update_flags(&self.tx, session_id, flags)
    }

    fn insert_entry(&self, session_id: SessionId, raw_line: &str) -> Result<()> {
        queries::entry::insert(&self.tx, session_id, raw_line)
    }

    fn mark_session_archived(&self, session_id: SessionId) -> Result<()> {
        queries::session::mark_archived(&self.tx, session_id)
    }
}
