//! Plain-text rendering for console output.
//!
//! Every function returns the text instead of printing so the shapes can be
//! snapshot-tested.

use jlog_format::LogSummary;
use jlog_index::{EntryRecord, ProgramRecord, SessionRecord};
use jlog_runtime::{IngestProgress, IngestReport};
use std::path::Path;

/// One line per ingest event worth showing; `None` for silent events.
pub fn ingest_event(progress: &IngestProgress) -> Option<String> {
    match progress {
        IngestProgress::ProgramsRegistered { count } if *count > 0 => {
            Some(format!("Registered {} new program(s)", count))
        }
        IngestProgress::ProgramsRegistered { .. } => None,
        IngestProgress::ProgramScanning {
            name, file_count, ..
        } => Some(format!("[{}] {} file(s)", name, file_count)),
        IngestProgress::ProgramSkipped { name, reason, .. } => {
            Some(format!("[{}] skipped: {}", name, reason))
        }
        IngestProgress::FileIngested {
            path,
            session_id,
            entries,
        } => Some(format!(
            "  ok     {} (session {}, {} entries)",
            path.display(),
            session_id,
            entries
        )),
        IngestProgress::FileFailed { error } => Some(format!("  FAILED {}", error)),
        IngestProgress::Completed { .. } => None,
    }
}

pub fn ingest_summary(report: &IngestReport) -> String {
    format!(
        "Done: {} file(s) ingested, {} failed, {} entries written ({} program(s) scanned, {} new)",
        report.files_ingested,
        report.files_failed,
        report.entries_written,
        report.programs_scanned,
        report.new_programs
    )
}

pub fn check_summary(path: &Path, summary: &LogSummary) -> String {
    let header = &summary.header;
    let footer = match &summary.footer {
        Some(footer) => footer.message.clone().unwrap_or_else(|| footer.level.clone()),
        None => "none".to_string(),
    };

    [
        format!("file:      {}", path.display()),
        format!("program:   {}", header.program_name),
        format!("started:   {}", header.timestamp),
        format!(
            "logger:    {} (PowerShell {})",
            header.json_logger_version, header.ps_version
        ),
        format!("severity:  {}", header.flags().severity_label()),
        format!("bodies:    {}", summary.body_count),
        format!("footer:    {}", footer),
        format!("lines:     {}", summary.line_count),
    ]
    .join("\n")
}

pub fn program_table(programs: &[ProgramRecord]) -> String {
    if programs.is_empty() {
        return "No programs registered.".to_string();
    }

    let mut lines = vec![format!(
        "{:<5} {:<20} {:<8} {:<8} {}",
        "ID", "NAME", "ARCHIVE", "DELETE", "LOG FOLDER"
    )];
    for program in programs {
        lines.push(format!(
            "{:<5} {:<20} {:<8} {:<8} {}",
            program.id,
            program.name,
            days(program.archive_after_days),
            days(program.delete_after_days),
            program.log_folder_path
        ));
    }
    lines.join("\n")
}

pub fn session_table(sessions: &[SessionRecord]) -> String {
    if sessions.is_empty() {
        return "No sessions found.".to_string();
    }

    let mut lines = vec![format!(
        "{:<5} {:<8} {:<26} {:<9} {:<9} {}",
        "ID", "PROGRAM", "CREATED", "SEVERITY", "ARCHIVED", "SOURCE"
    )];
    for session in sessions {
        lines.push(format!(
            "{:<5} {:<8} {:<26} {:<9} {:<9} {}",
            session.id,
            session.program_id,
            session.created_at,
            session.flags.severity_label(),
            if session.is_archived { "yes" } else { "no" },
            session.source_path.as_deref().unwrap_or("-")
        ));
    }
    lines.join("\n")
}

pub fn session_detail(session: &SessionRecord, entries: &[EntryRecord]) -> String {
    let mut lines = vec![
        format!(
            "Session {} (program {}), created {}",
            session.id, session.program_id, session.created_at
        ),
        format!(
            "severity: {}, archived: {}, source: {}",
            session.flags.severity_label(),
            if session.is_archived { "yes" } else { "no" },
            session.source_path.as_deref().unwrap_or("-")
        ),
        String::new(),
    ];
    for entry in entries {
        lines.push(format!("{:>4} {}", entry.seq, entry.log_entry));
    }
    lines.join("\n")
}

fn days(value: Option<i64>) -> String {
    value
        .map(|d| format!("{}d", d))
        .unwrap_or_else(|| "-".to_string())
}
