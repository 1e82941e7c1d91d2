use jlog_types::SessionId;
use rusqlite::{Connection, params};

use crate::{Result, records::EntryRecord};

/// Append a line to a session; `seq` continues from the session's last entry.
pub fn insert(conn: &Connection, session_id: SessionId, raw_line: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO entries (session_id, seq, log_entry)
        SELECT ?1, COALESCE(MAX(seq), 0) + 1, ?2
        FROM entries
        WHERE session_id = ?1
        "#,
        params![session_id.get(), raw_line],
    )?;

    Ok(())
}

pub fn list(conn: &Connection, session_id: SessionId) -> Result<Vec<EntryRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, session_id, seq, log_entry
        FROM entries
        WHERE session_id = ?1
        ORDER BY seq
        "#,
    )?;

    let entries = stmt
        .query_map([session_id.get()], |row| {
            Ok(EntryRecord {
                id: row.get(0)?,
                session_id: SessionId::new(row.get(1)?),
                seq: row.get(2)?,
                log_entry: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(entries)
}

pub fn count(conn: &Connection, session_id: SessionId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE session_id = ?1",
        [session_id.get()],
        |row| row.get(0),
    )?;

    Ok(count as usize)
}
