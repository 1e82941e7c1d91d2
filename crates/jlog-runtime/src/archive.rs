use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::{Error, Result};

const PARTIAL_SUFFIX: &str = ".partial";

/// Writes fully ingested log files into per-folder zip archives.
///
/// `<archive_root>/<parent folder name>/<file stem>.zip`, holding a single
/// deflated entry named after the source file. The archive only appears under
/// its final name once it has been completely written and synced.
#[derive(Debug, Clone)]
pub struct Archiver {
    archive_root: PathBuf,
}

impl Archiver {
    pub fn new(archive_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
        }
    }

    pub fn archive_path_for(&self, source: &Path) -> Result<PathBuf> {
        let folder = source
            .parent()
            .and_then(Path::file_name)
            .ok_or_else(|| invalid_source(source, "has no parent folder"))?;
        let file_name = source
            .file_name()
            .ok_or_else(|| invalid_source(source, "has no file name"))?;

        Ok(self
            .archive_root
            .join(folder)
            .join(file_name)
            .with_extension("zip"))
    }

    /// Archive `source` and return the archive path. Never touches `source`.
    pub fn archive(&self, source: &Path) -> Result<PathBuf> {
        let dest = self.archive_path_for(source)?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let partial = partial_path(&dest);
        let written = write_zip(source, &partial).and_then(|()| {
            std::fs::rename(&partial, &dest)?;
            Ok(())
        });

        if let Err(err) = written {
            // Ignore cleanup failure: the partial name is never read back
            let _ = std::fs::remove_file(&partial);
            return Err(err);
        }

        debug!(source = %source.display(), archive = %dest.display(), "archived");
        Ok(dest)
    }
}

fn write_zip(source: &Path, dest: &Path) -> Result<()> {
    let entry_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| invalid_source(source, "has no file name"))?;

    let mut input = File::open(source)?;
    let output = File::create(dest)?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(output);
    zip.start_file(entry_name, options)?;
    io::copy(&mut input, &mut zip)?;

    let output = zip.finish()?;
    output.sync_all()?;
    Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

fn invalid_source(source: &Path, reason: &str) -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("cannot archive {}: {}", source.display(), reason),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn write_source(dir: &Path, folder: &str, name: &str, content: &str) -> PathBuf {
        let folder = dir.join(folder);
        std::fs::create_dir_all(&folder).unwrap();
        let path = folder.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_archive_path_mirrors_parent_folder() {
        let archiver = Archiver::new("/srv/archive");
        let dest = archiver
            .archive_path_for(Path::new("/srv/logs/Sync-Users/run-01.log"))
            .unwrap();

        assert_eq!(dest, PathBuf::from("/srv/archive/Sync-Users/run-01.zip"));
    }

    #[test]
    fn test_archive_path_without_extension() {
        let archiver = Archiver::new("/srv/archive");
        let dest = archiver
            .archive_path_for(Path::new("/srv/logs/app/output"))
            .unwrap();

        assert_eq!(dest, PathBuf::from("/srv/archive/app/output.zip"));
    }

    #[test]
    fn test_archive_path_requires_parent_folder() {
        let archiver = Archiver::new("/srv/archive");
        assert!(archiver.archive_path_for(Path::new("run.log")).is_err());
    }

    #[test]
    fn test_archive_writes_single_deflated_entry() -> Result<()> {
        let temp = TempDir::new()?;
        let content = "{\"level\":\"START\"}\n{\"level\":\"END\"}\n";
        let source = write_source(temp.path(), "logs/app", "run.log", content);
        let archiver = Archiver::new(temp.path().join("archive"));

        let dest = archiver.archive(&source)?;
        assert_eq!(dest, temp.path().join("archive/app/run.zip"));
        assert!(source.exists(), "source must be left for the caller");
        assert!(!partial_path(&dest).exists());

        let mut zip = zip::ZipArchive::new(File::open(&dest)?)?;
        assert_eq!(zip.len(), 1);
        let mut entry = zip.by_index(0)?;
        assert_eq!(entry.name(), "run.log");
        assert_eq!(entry.compression(), CompressionMethod::Deflated);

        let mut restored = String::new();
        entry.read_to_string(&mut restored)?;
        assert_eq!(restored, content);

        Ok(())
    }

    #[test]
    fn test_archive_failure_leaves_no_file_behind() -> Result<()> {
        let temp = TempDir::new()?;
        let source = write_source(temp.path(), "logs/app", "run.log", "data");

        // archive root is a regular file, so the folder cannot be created
        let blocked = temp.path().join("archive");
        std::fs::write(&blocked, "not a directory")?;
        let archiver = Archiver::new(&blocked);

        assert!(archiver.archive(&source).is_err());
        assert_eq!(std::fs::read_to_string(&source)?, "data");
        assert_eq!(std::fs::read_to_string(&blocked)?, "not a directory");

        Ok(())
    }

    #[test]
    fn test_archive_missing_source_cleans_partial() -> Result<()> {
        let temp = TempDir::new()?;
        let archiver = Archiver::new(temp.path().join("archive"));
        let source = temp.path().join("logs/app/missing.log");

        assert!(archiver.archive(&source).is_err());

        let dest = archiver.archive_path_for(&source)?;
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());

        Ok(())
    }
}
