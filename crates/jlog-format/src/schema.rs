use jlog_types::SessionFlags;
use serde::{Deserialize, Serialize};

use crate::timestamp::LogTimestamp;

/// First line of every log file, written when the logger starts.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRecord {
    pub timestamp: LogTimestamp,
    pub level: String,
    pub program_name: String,
    #[serde(rename = "PSVersion")]
    pub ps_version: String,
    pub json_logger_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_warning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_fatal: Option<bool>,
}

impl HeaderRecord {
    /// Session flags carried by this header; absent or null markers are false
    pub fn flags(&self) -> SessionFlags {
        SessionFlags {
            has_warning: self.has_warning.unwrap_or(false),
            has_error: self.has_error.unwrap_or(false),
            has_fatal: self.has_fatal.unwrap_or(false),
        }
    }
}

/// Regular log line. Only `calledFrom` is mandatory (checked by the parser).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<LogTimestamp>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub called_from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_stack: Option<String>,
}

/// Closing line written when the logger shuts down cleanly.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FooterRecord {
    pub timestamp: LogTimestamp,
    pub level: String,
    #[serde(
        rename = "Message",
        alias = "message",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}
