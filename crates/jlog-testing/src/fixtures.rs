//! Log line builders.
//!
//! Lines are produced with `serde_json` so field escaping matches what the
//! logger writes; timestamps use the logger's layout with a fixed offset.

use serde_json::{Map, Value, json};

pub const HEADER_TIMESTAMP: &str = "2024-03-05T14:07:09.1234567-05:00";
pub const BODY_TIMESTAMP: &str = "2024-03-05T14:07:10.5-05:00";
pub const FOOTER_TIMESTAMP: &str = "2024-03-05T14:09:00-05:00";

/// UTF-8 byte-order mark as written by some hosts at the start of a file.
pub const UTF8_BOM: &str = "\u{feff}";

/// Builder for the first line of a log file.
#[derive(Debug, Clone)]
pub struct HeaderLine {
    program_name: String,
    has_warning: Option<bool>,
    has_error: Option<bool>,
    has_fatal: Option<bool>,
}

impl HeaderLine {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            has_warning: None,
            has_error: None,
            has_fatal: None,
        }
    }

    pub fn warning(mut self, value: bool) -> Self {
        self.has_warning = Some(value);
        self
    }

    pub fn error(mut self, value: bool) -> Self {
        self.has_error = Some(value);
        self
    }

    pub fn fatal(mut self, value: bool) -> Self {
        self.has_fatal = Some(value);
        self
    }

    pub fn build(&self) -> String {
        let mut fields = Map::new();
        fields.insert("timestamp".into(), json!(HEADER_TIMESTAMP));
        fields.insert("level".into(), json!("START"));
        fields.insert("programName".into(), json!(self.program_name));
        fields.insert("PSVersion".into(), json!("7.4.1"));
        fields.insert("jsonLoggerVersion".into(), json!("1.2.0"));

        // absent flags are omitted, not written as false
        for (key, value) in [
            ("hasWarning", self.has_warning),
            ("hasError", self.has_error),
            ("hasFatal", self.has_fatal),
        ] {
            if let Some(value) = value {
                fields.insert(key.into(), json!(value));
            }
        }

        Value::Object(fields).to_string()
    }
}

pub fn body_line(message: &str, called_from: &str) -> String {
    json!({
        "timestamp": BODY_TIMESTAMP,
        "level": "INFO",
        "message": message,
        "context": format!("step {}", message),
        "calledFrom": called_from,
    })
    .to_string()
}

pub fn footer_line(message: Option<&str>) -> String {
    let mut fields = Map::new();
    fields.insert("timestamp".into(), json!(FOOTER_TIMESTAMP));
    fields.insert("level".into(), json!("END"));
    if let Some(message) = message {
        fields.insert("Message".into(), json!(message));
    }
    Value::Object(fields).to_string()
}

/// A complete, valid file: header, one body per message, footer.
pub fn session_lines(header: &HeaderLine, messages: &[&str]) -> Vec<String> {
    let mut lines = vec![header.build()];
    for (index, message) in messages.iter().enumerate() {
        lines.push(body_line(message, &format!("script.ps1:{}", index + 10)));
    }
    lines.push(footer_line(Some("Finished")));
    lines
}
