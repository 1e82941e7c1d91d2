use chrono::Utc;
use jlog_format::{Error as FormatError, LogLines, parse_header, parse_line};
use jlog_index::{Database, SessionStore};
use jlog_types::{ProgramId, SessionId};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::archive::Archiver;
use crate::error::{FileError, FileStage};
use crate::fs::file_created_at;

/// Outcome of a fully processed log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedFile {
    pub session_id: SessionId,
    pub entries: usize,
    pub archive_path: PathBuf,
}

/// Turns one log file into a session, archives it, then removes it.
///
/// In atomic mode every write for the file shares one transaction that is
/// committed only after the archive is durable; a failure leaves storage as
/// if the file had never been seen. Otherwise each write autocommits and a
/// failure part-way leaves the entries written so far.
pub struct SessionIngestor<'a> {
    db: &'a Database,
    archiver: &'a Archiver,
    atomic: bool,
}

impl<'a> SessionIngestor<'a> {
    pub fn new(db: &'a Database, archiver: &'a Archiver, atomic: bool) -> Self {
        Self {
            db,
            archiver,
            atomic,
        }
    }

    pub fn ingest(&self, program_id: ProgramId, path: &Path) -> Result<IngestedFile, FileError> {
        let ingested = if self.atomic {
            let tx = self
                .db
                .begin_session()
                .map_err(|e| FileError::new(path, FileStage::Storage, e))?;
            let ingested = write_session(&tx, self.archiver, program_id, path)?;

            if let Err(err) = tx.commit() {
                // The session is gone, so the archive must not claim otherwise
                if let Err(cleanup) = std::fs::remove_file(&ingested.archive_path) {
                    warn!(
                        archive = %ingested.archive_path.display(),
                        "failed to remove orphaned archive: {}", cleanup
                    );
                }
                return Err(FileError::new(path, FileStage::Storage, err));
            }
            ingested
        } else {
            write_session(self.db, self.archiver, program_id, path)?
        };

        std::fs::remove_file(path).map_err(|e| FileError::new(path, FileStage::Delete, e))?;
        debug!(path = %path.display(), "removed ingested file");

        Ok(ingested)
    }
}

/// Steps from open to archived, against any session store.
fn write_session<S: SessionStore>(
    store: &S,
    archiver: &Archiver,
    program_id: ProgramId,
    path: &Path,
) -> Result<IngestedFile, FileError> {
    let storage = |e: jlog_index::Error| FileError::new(path, FileStage::Storage, e);

    let mut lines = LogLines::open(path).map_err(|e| FileError::new(path, FileStage::Open, e))?;

    let first = match lines.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => return Err(FileError::new(path, FileStage::Read, e)),
        None => {
            return Err(FileError::new(
                path,
                FileStage::Header,
                FormatError::InvalidHeader("file is empty".to_string()),
            ));
        }
    };
    let header =
        parse_header(&first.text).map_err(|e| FileError::new(path, FileStage::Header, e))?;

    let created_at = file_created_at(path).unwrap_or_else(Utc::now).to_rfc3339();
    let source_path = path.to_string_lossy();
    let session_id = store
        .create_session(program_id, &created_at, &source_path)
        .map_err(storage)?;
    debug!(session_id = %session_id, path = %path.display(), "created session");

    let flags = header.flags();
    if flags.any() {
        store
            .update_session_flags(session_id, flags)
            .map_err(storage)?;
    }

    store.insert_entry(session_id, &first.text).map_err(storage)?;
    let mut entries = 1;

    for line in lines.by_ref() {
        let line = line.map_err(|e| FileError::new(path, FileStage::Read, e))?;

        if let Err(err) = parse_line(&line.text) {
            return Err(FileError::new(
                path,
                FileStage::Line {
                    number: line.number,
                    content: line.text,
                },
                err,
            ));
        }

        store.insert_entry(session_id, &line.text).map_err(storage)?;
        entries += 1;
    }
    drop(lines);

    let archive_path = archiver
        .archive(path)
        .map_err(|e| FileError::new(path, FileStage::Archive, e))?;
    store.mark_session_archived(session_id).map_err(storage)?;

    Ok(IngestedFile {
        session_id,
        entries,
        archive_path,
    })
}
