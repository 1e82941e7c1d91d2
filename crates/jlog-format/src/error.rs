use std::fmt;

/// Result type for jlog-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding logger output
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Timestamp does not follow `YYYY-MM-DDTHH:MM:SS[.fraction]±HH:MM`
    MalformedTimestamp { input: String, reason: String },

    /// First line of a file is not a valid header record
    InvalidHeader(String),

    /// Line is not a valid footer record
    InvalidFooter(String),

    /// Line matches none of the record shapes (body, then footer)
    UnparseableLine { body: String, footer: String },

    /// Decode failure attached to a 1-based line number
    AtLine { line_number: usize, source: Box<Error> },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::MalformedTimestamp { input, reason } => {
                write!(f, "Malformed timestamp '{}': {}", input, reason)
            }
            Error::InvalidHeader(msg) => write!(f, "Invalid header: {}", msg),
            Error::InvalidFooter(msg) => write!(f, "Invalid footer: {}", msg),
            Error::UnparseableLine { body, footer } => write!(
                f,
                "Unparseable line: not a body ({}) and not a footer ({})",
                body, footer
            ),
            Error::AtLine {
                line_number,
                source,
            } => write!(f, "line {}: {}", line_number, source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::AtLine { source, .. } => Some(source.as_ref()),
            Error::MalformedTimestamp { .. }
            | Error::InvalidHeader(_)
            | Error::InvalidFooter(_)
            | Error::UnparseableLine { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl Error {
    pub fn at_line(self, line_number: usize) -> Self {
        Error::AtLine {
            line_number,
            source: Box::new(self),
        }
    }
}
