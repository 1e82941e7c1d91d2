use jlog_index::Database;
use jlog_types::{ProgramId, SessionId};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::registry::sync_programs;
use super::session::SessionIngestor;
use crate::archive::Archiver;
use crate::config::Config;
use crate::error::FileError;
use crate::fs::list_files;
use crate::Result;

#[derive(Debug)]
pub enum IngestProgress {
    ProgramsRegistered {
        count: usize,
    },
    ProgramScanning {
        program_id: ProgramId,
        name: String,
        file_count: usize,
    },
    ProgramSkipped {
        program_id: ProgramId,
        name: String,
        reason: String,
    },
    FileIngested {
        path: PathBuf,
        session_id: SessionId,
        entries: usize,
    },
    FileFailed {
        error: FileError,
    },
    Completed {
        report: IngestReport,
    },
}

/// Totals for one ingestion sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub new_programs: usize,
    pub programs_scanned: usize,
    pub files_seen: usize,
    pub files_ingested: usize,
    pub files_failed: usize,
    pub entries_written: usize,
}

pub struct IngestService<'a> {
    db: &'a Database,
    log_root: PathBuf,
    archiver: Archiver,
    atomic_sessions: bool,
}

impl<'a> IngestService<'a> {
    pub fn new(
        db: &'a Database,
        log_root: PathBuf,
        archiver: Archiver,
        atomic_sessions: bool,
    ) -> Self {
        Self {
            db,
            log_root,
            archiver,
            atomic_sessions,
        }
    }

    pub fn from_config(db: &'a Database, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            db,
            config.log_root()?.to_path_buf(),
            Archiver::new(config.archive_root()?),
            config.ingest.atomic_sessions,
        ))
    }

    /// One sweep: register new folders, then ingest every file of every program.
    ///
    /// Only storage and root-enumeration failures abort the sweep; per-file
    /// and per-folder problems are reported through `on_progress`.
    pub fn run<F>(&self, mut on_progress: F) -> Result<IngestReport>
    where
        F: FnMut(IngestProgress),
    {
        let mut report = IngestReport {
            new_programs: sync_programs(self.db, &self.log_root)?,
            ..IngestReport::default()
        };
        on_progress(IngestProgress::ProgramsRegistered {
            count: report.new_programs,
        });

        let ingestor = SessionIngestor::new(self.db, &self.archiver, self.atomic_sessions);

        for program in self.db.list_programs()? {
            let folder = Path::new(&program.log_folder_path);
            let files = match list_files(folder) {
                Ok(files) => files,
                Err(err) => {
                    warn!(program = %program.name, "skipping {}: {}", folder.display(), err);
                    on_progress(IngestProgress::ProgramSkipped {
                        program_id: program.id,
                        name: program.name,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            info!(program = %program.name, files = files.len(), "scanning program");
            report.programs_scanned += 1;
            report.files_seen += files.len();
            on_progress(IngestProgress::ProgramScanning {
                program_id: program.id,
                name: program.name.clone(),
                file_count: files.len(),
            });

            for path in files {
                match ingestor.ingest(program.id, &path) {
                    Ok(ingested) => {
                        info!(
                            session_id = %ingested.session_id,
                            entries = ingested.entries,
                            "ingested {}", path.display()
                        );
                        report.files_ingested += 1;
                        report.entries_written += ingested.entries;
                        on_progress(IngestProgress::FileIngested {
                            path,
                            session_id: ingested.session_id,
                            entries: ingested.entries,
                        });
                    }
                    Err(error) => {
                        warn!("{}", error);
                        report.files_failed += 1;
                        on_progress(IngestProgress::FileFailed { error });
                    }
                }
            }
        }

        on_progress(IngestProgress::Completed {
            report: report.clone(),
        });

        Ok(report)
    }
}
