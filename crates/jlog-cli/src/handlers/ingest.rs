use crate::console;
use crate::types::OutputFormat;
use anyhow::Result;
use jlog_index::Database;
use jlog_runtime::{Config, IngestProgress, IngestReport, IngestService};
use serde::Serialize;

#[derive(Serialize)]
struct FailedFile {
    path: String,
    stage: String,
    error: String,
}

#[derive(Serialize)]
struct IngestOutput {
    #[serde(flatten)]
    report: IngestReport,
    failures: Vec<FailedFile>,
}

/// Exit status is success even when individual files failed; those are
/// reported and left in place for the next run.
pub fn handle(db: &Database, config: &Config, format: OutputFormat) -> Result<()> {
    let service = IngestService::from_config(db, config)?;
    let mut failures = Vec::new();

    let report = service.run(|progress| {
        if let IngestProgress::FileFailed { error } = &progress {
            failures.push(FailedFile {
                path: error.path.display().to_string(),
                stage: error.stage.to_string(),
                error: error.source.to_string(),
            });
        }

        if format == OutputFormat::Plain
            && let Some(line) = console::ingest_event(&progress)
        {
            println!("{}", line);
        }
    })?;

    match format {
        OutputFormat::Plain => println!("{}", console::ingest_summary(&report)),
        OutputFormat::Json => {
            let output = IngestOutput { report, failures };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
