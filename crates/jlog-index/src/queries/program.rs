use std::collections::HashSet;

use jlog_types::ProgramId;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{Result, records::ProgramRecord};

pub fn insert(conn: &Connection, name: &str, log_folder_path: &str) -> Result<ProgramId> {
    conn.execute(
        r#"
        INSERT INTO programs (name, log_folder_path)
        VALUES (?1, ?2)
        "#,
        params![name, log_folder_path],
    )?;

    Ok(ProgramId::new(conn.last_insert_rowid()))
}

pub fn known_paths(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT log_folder_path FROM programs")?;

    let paths = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<HashSet<String>, _>>()?;

    Ok(paths)
}

pub fn get(conn: &Connection, id: ProgramId) -> Result<Option<ProgramRecord>> {
    let result = conn
        .query_row(
            r#"
        SELECT id, name, log_folder_path, archive_after_days, delete_after_days
        FROM programs
        WHERE id = ?1
        "#,
            [id.get()],
            from_row,
        )
        .optional()?;

    Ok(result)
}

pub fn list(conn: &Connection) -> Result<Vec<ProgramRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, name, log_folder_path, archive_after_days, delete_after_days
        FROM programs
        ORDER BY id
        "#,
    )?;

    let programs = stmt
        .query_map([], from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(programs)
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<ProgramRecord> {
    Ok(ProgramRecord {
        id: ProgramId::new(row.get(0)?),
        name: row.get(1)?,
        log_folder_path: row.get(2)?,
        archive_after_days: row.get(3)?,
        delete_after_days: row.get(4)?,
    })
}
