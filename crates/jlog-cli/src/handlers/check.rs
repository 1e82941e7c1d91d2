use crate::console;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use jlog_format::check_log_file;
use std::path::Path;

/// Dry run over one file: nothing is stored, archived or deleted.
pub fn handle(path: &Path, format: OutputFormat) -> Result<()> {
    let summary =
        check_log_file(path).with_context(|| format!("{} is not a valid log", path.display()))?;

    match format {
        OutputFormat::Plain => println!("{}", console::check_summary(path, &summary)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": path.display().to_string(),
                "header": summary.header,
                "severity": summary.header.flags().severity_label(),
                "body_count": summary.body_count,
                "footer": summary.footer,
                "line_count": summary.line_count,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
