pub mod archive;
pub mod config;
pub mod error;
pub mod fs;
pub mod ops;

pub use archive::Archiver;
pub use config::{Config, IngestConfig};
pub use error::{Error, FileError, FileStage, Result};
pub use fs::{file_created_at, list_files, list_subdirectories};
pub use ops::{
    IngestProgress, IngestReport, IngestService, IngestedFile, SessionIngestor, sync_programs,
};
