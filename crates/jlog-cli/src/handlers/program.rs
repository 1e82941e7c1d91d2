use crate::console;
use crate::types::OutputFormat;
use anyhow::Result;
use jlog_index::Database;

pub fn handle_list(db: &Database, format: OutputFormat) -> Result<()> {
    let programs = db.list_programs()?;

    match format {
        OutputFormat::Plain => println!("{}", console::program_table(&programs)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&programs)?),
    }

    Ok(())
}
