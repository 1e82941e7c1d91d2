use jlog_types::{ProgramId, SessionFlags, SessionId};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{Error, Result, records::SessionRecord};

const SELECT_COLUMNS: &str = r#"
    SELECT id, program_id, created_at, source_path,
           has_warning, has_error, has_fatal, is_archived
    FROM sessions
"#;

pub fn insert(
    conn: &Connection,
    program_id: ProgramId,
    created_at: &str,
    source_path: &str,
) -> Result<SessionId> {
    conn.execute(
        r#"
        INSERT INTO sessions (program_id, created_at, source_path)
        VALUES (?1, ?2, ?3)
        "#,
        params![program_id.get(), created_at, source_path],
    )?;

    Ok(SessionId::new(conn.last_insert_rowid()))
}

pub fn update_flags(conn: &Connection, session_id: SessionId, flags: SessionFlags) -> Result<()> {
    let updated = conn.execute(
        r#"
        UPDATE sessions
        SET has_warning = ?2, has_error = ?3, has_fatal = ?4
        WHERE id = ?1
        "#,
        params![
            session_id.get(),
            flags.has_warning,
            flags.has_error,
            flags.has_fatal
        ],
    )?;

    expect_one_row(updated, session_id)
}

pub fn mark_archived(conn: &Connection, session_id: SessionId) -> Result<()> {
    let updated = conn.execute(
        "UPDATE sessions SET is_archived = 1 WHERE id = ?1",
        [session_id.get()],
    )?;

    expect_one_row(updated, session_id)
}

pub fn get(conn: &Connection, session_id: SessionId) -> Result<Option<SessionRecord>> {
    let query = format!("{} WHERE id = ?1", SELECT_COLUMNS);
    let result = conn
        .query_row(&query, [session_id.get()], from_row)
        .optional()?;

    Ok(result)
}

pub fn list(conn: &Connection, program_id: Option<ProgramId>) -> Result<Vec<SessionRecord>> {
    let sessions = if let Some(program_id) = program_id {
        let query = format!(
            "{} WHERE program_id = ?1 ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        stmt.query_map([program_id.get()], from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?
    } else {
        let query = format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&query)?;
        stmt.query_map([], from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?
    };

    Ok(sessions)
}

fn expect_one_row(updated: usize, session_id: SessionId) -> Result<()> {
    if updated == 0 {
        return Err(Error::Query(format!("session {} not found", session_id)));
    }
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<SessionRecord> {
    Ok(SessionRecord {
        id: SessionId::new(row.get(0)?),
        program_id: ProgramId::new(row.get(1)?),
        created_at: row.get(2)?,
        source_path: row.get(3)?,
        flags: SessionFlags {
            has_warning: row.get(4)?,
            has_error: row.get(5)?,
            has_fatal: row.get(6)?,
        },
        is_archived: row.get(7)?,
    })
}
