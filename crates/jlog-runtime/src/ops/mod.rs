pub mod ingest;
pub mod registry;
pub mod session;

pub use ingest::{IngestProgress, IngestReport, IngestService};
pub use registry::sync_programs;
pub use session::{IngestedFile, SessionIngestor};
