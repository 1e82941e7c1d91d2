use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for jlog-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Storage layer error
    Index(jlog_index::Error),

    /// Log decoding error
    Format(jlog_format::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Directory traversal failed
    WalkDir(walkdir::Error),

    /// Zip archive could not be written
    Archive(zip::result::ZipError),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::Format(err) => write!(f, "Format error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory walk error: {}", err),
            Error::Archive(err) => write!(f, "Archive error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Format(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Archive(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<jlog_index::Error> for Error {
    fn from(err: jlog_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<jlog_format::Error> for Error {
    fn from(err: jlog_format::Error) -> Self {
        Error::Format(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Archive(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Step of the per-file pipeline at which a file was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStage {
    Open,
    Header,
    Line { number: usize, content: String },
    Read,
    Storage,
    Archive,
    Delete,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStage::Open => write!(f, "open"),
            FileStage::Header => write!(f, "header"),
            FileStage::Line { number, content } => write!(f, "line {} `{}`", number, content),
            FileStage::Read => write!(f, "read"),
            FileStage::Storage => write!(f, "storage"),
            FileStage::Archive => write!(f, "archive"),
            FileStage::Delete => write!(f, "delete"),
        }
    }
}

/// Failure confined to a single log file; the run continues with the next one.
#[derive(Debug)]
pub struct FileError {
    pub path: PathBuf,
    pub stage: FileStage,
    pub source: Error,
}

impl FileError {
    pub fn new(path: &Path, stage: FileStage, source: impl Into<Error>) -> Self {
        Self {
            path: path.to_path_buf(),
            stage,
            source: source.into(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: failed at {}: {}",
            self.path.display(),
            self.stage,
            self.source
        )
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_display_includes_line_content() {
        let err = FileError::new(
            Path::new("/srv/logs/app/run.log"),
            FileStage::Line {
                number: 3,
                content: "{oops".to_string(),
            },
            jlog_format::Error::InvalidFooter("bad".to_string()),
        );

        let msg = err.to_string();
        assert!(msg.starts_with("/srv/logs/app/run.log: failed at line 3 `{oops`"));
        assert!(msg.contains("Invalid footer: bad"));
    }

    #[test]
    fn test_file_error_source_chain() {
        let err = FileError::new(
            Path::new("a.log"),
            FileStage::Open,
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "IO error: gone");
    }
}
