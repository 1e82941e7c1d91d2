use crate::console;
use crate::types::OutputFormat;
use anyhow::{Result, anyhow};
use jlog_index::Database;
use jlog_types::{ProgramId, SessionId};

pub fn handle_list(db: &Database, program: Option<i64>, format: OutputFormat) -> Result<()> {
    let sessions = db.list_sessions(program.map(ProgramId::new))?;

    match format {
        OutputFormat::Plain => println!("{}", console::session_table(&sessions)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
    }

    Ok(())
}

pub fn handle_show(db: &Database, id: i64, format: OutputFormat) -> Result<()> {
    let session_id = SessionId::new(id);
    let session = db
        .get_session(session_id)?
        .ok_or_else(|| anyhow!("Session {} not found", id))?;
    let entries = db.list_entries(session_id)?;

    match format {
        OutputFormat::Plain => println!("{}", console::session_detail(&session, &entries)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "session": session,
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
