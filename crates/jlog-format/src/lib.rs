// Error types
pub mod error;

// Timestamp codec
pub mod timestamp;

// Record shapes (header/body/footer)
pub mod schema;

// Line grammar
pub mod parser;

// File reading and dry-run validation
pub mod io;

pub use error::{Error, Result};
pub use io::{LogLines, LogSummary, NumberedLine, check_log_file};
pub use parser::{
    BodyMatch, LogRecord, RecordKind, UTF8_BOM, match_body, parse_footer, parse_header,
    parse_line, strip_bom,
};
pub use schema::{BodyRecord, FooterRecord, HeaderRecord};
pub use timestamp::{LogTimestamp, TIMESTAMP_LAYOUT, parse_timestamp};
