use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier of an ingestion session (one ingested log file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(i64);

impl SessionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Severity markers a logger writes into the header line of a file.
///
/// Set once when the session is created and never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionFlags {
    pub has_warning: bool,
    pub has_error: bool,
    pub has_fatal: bool,
}

impl SessionFlags {
    /// True when at least one flag is raised
    pub fn any(&self) -> bool {
        self.has_warning || self.has_error || self.has_fatal
    }

    /// Short label for console output ("fatal", "error", "warning" or "ok")
    pub fn severity_label(&self) -> &'static str {
        if self.has_fatal {
            "fatal"
        } else if self.has_error {
            "error"
        } else if self.has_warning {
            "warning"
        } else {
            "ok"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags_are_clear() {
        let flags = SessionFlags::default();
        assert!(!flags.any());
        assert_eq!(flags.severity_label(), "ok");
    }

    #[test]
    fn test_severity_label_prefers_most_severe() {
        let flags = SessionFlags {
            has_warning: true,
            has_error: true,
            has_fatal: false,
        };
        assert!(flags.any());
        assert_eq!(flags.severity_label(), "error");

        let fatal = SessionFlags {
            has_fatal: true,
            ..Default::default()
        };
        assert_eq!(fatal.severity_label(), "fatal");
    }
}
