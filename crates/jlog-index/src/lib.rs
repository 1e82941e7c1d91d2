// SQLite store for ingested logs
// Programs, sessions, and verbatim entries; lines are stored raw, not normalized

mod db;
mod error;
mod queries;
mod records;
mod schema;
mod store;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use records::{EntryRecord, ProgramRecord, SessionRecord};
pub use schema::SCHEMA_VERSION;
pub use store::{SessionStore, SessionTransaction};
