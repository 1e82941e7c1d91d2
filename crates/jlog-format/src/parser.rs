use std::fmt;

use crate::schema::{BodyRecord, FooterRecord, HeaderRecord};
use crate::{Error, Result};

/// UTF-8 byte-order mark (`EF BB BF`) some loggers prepend to the first line
pub const UTF8_BOM: char = '\u{feff}';

/// Remove a leading byte-order mark, if any
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix(UTF8_BOM).unwrap_or(line)
}

/// Shape of a line after the first. Lines carry no explicit tag; the header
/// is known by position and decoded with [`parse_header`], the rest by field
/// presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Body,
    Footer,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Body => write!(f, "body"),
            RecordKind::Footer => write!(f, "footer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    Body(BodyRecord),
    Footer(FooterRecord),
}

impl LogRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            LogRecord::Body(_) => RecordKind::Body,
            LogRecord::Footer(_) => RecordKind::Footer,
        }
    }
}

/// Outcome of a body decode attempt.
///
/// `NotBody` is a structural mismatch, not a failure: the caller is expected
/// to try the footer shape on the same line.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyMatch {
    Matched(BodyRecord),
    NotBody(String),
}

/// Decode the first line of a file (BOM already stripped).
pub fn parse_header(line: &str) -> Result<HeaderRecord> {
    let header: HeaderRecord =
        serde_json::from_str(line).map_err(|e| Error::InvalidHeader(e.to_string()))?;

    let required = [
        ("level", &header.level),
        ("programName", &header.program_name),
        ("PSVersion", &header.ps_version),
        ("jsonLoggerVersion", &header.json_logger_version),
    ];
    for (field, value) in required {
        if value.is_empty() {
            return Err(Error::InvalidHeader(format!("field `{}` is empty", field)));
        }
    }

    Ok(header)
}

pub fn match_body(line: &str) -> BodyMatch {
    match serde_json::from_str::<BodyRecord>(line) {
        Ok(body) if body.called_from.is_empty() => {
            BodyMatch::NotBody("calledFrom is missing or empty".to_string())
        }
        Ok(body) => BodyMatch::Matched(body),
        Err(e) => BodyMatch::NotBody(e.to_string()),
    }
}

pub fn parse_footer(line: &str) -> Result<FooterRecord> {
    let footer: FooterRecord =
        serde_json::from_str(line).map_err(|e| Error::InvalidFooter(e.to_string()))?;

    if footer.level.is_empty() {
        return Err(Error::InvalidFooter("field `level` is empty".to_string()));
    }

    Ok(footer)
}

/// Decode any line after the first: body, else footer, else `UnparseableLine`.
pub fn parse_line(line: &str) -> Result<LogRecord> {
    let not_body = match match_body(line) {
        BodyMatch::Matched(body) => return Ok(LogRecord::Body(body)),
        BodyMatch::NotBody(reason) => reason,
    };

    match parse_footer(line) {
        Ok(footer) => Ok(LogRecord::Footer(footer)),
        Err(Error::InvalidFooter(reason)) => Err(Error::UnparseableLine {
            body: not_body,
            footer: reason,
        }),
        Err(other) => Err(Error::UnparseableLine {
            body: not_body,
            footer: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r#"{"timestamp":"2024-03-05T14:07:09.1234567-05:00","level":"START","programName":"Sync-Users","PSVersion":"7.4.1","jsonLoggerVersion":"1.2.0"}"#;

    #[test]
    fn test_header_without_flags() {
        let header = parse_header(HEADER).unwrap();

        assert_eq!(header.program_name, "Sync-Users");
        assert_eq!(header.ps_version, "7.4.1");
        assert_eq!(header.json_logger_version, "1.2.0");
        assert!(!header.flags().any());
    }

    #[test]
    fn test_header_flags_map_exactly() {
        let line = r#"{"timestamp":"2024-03-05T14:07:09-05:00","level":"START","programName":"p","PSVersion":"5.1","jsonLoggerVersion":"1.0","hasWarning":true,"hasError":false,"hasFatal":true}"#;
        let flags = parse_header(line).unwrap().flags();

        assert!(flags.has_warning);
        assert!(!flags.has_error);
        assert!(flags.has_fatal);
    }

    #[test]
    fn test_header_null_flag_is_false() {
        let line = r#"{"timestamp":"2024-03-05T14:07:09-05:00","level":"START","programName":"p","PSVersion":"5.1","jsonLoggerVersion":"1.0","hasError":null}"#;
        assert!(!parse_header(line).unwrap().flags().has_error);
    }

    #[test]
    fn test_header_missing_version_fails() {
        let line = r#"{"timestamp":"2024-03-05T14:07:09-05:00","level":"START","programName":"p","PSVersion":"5.1"}"#;
        let err = parse_header(line).unwrap_err();

        assert!(matches!(err, Error::InvalidHeader(_)));
        assert!(err.to_string().contains("jsonLoggerVersion"));
    }

    #[test]
    fn test_header_empty_program_name_fails() {
        let line = r#"{"timestamp":"2024-03-05T14:07:09-05:00","level":"START","programName":"","PSVersion":"5.1","jsonLoggerVersion":"1.0"}"#;
        let err = parse_header(line).unwrap_err();
        assert!(err.to_string().contains("programName"));
    }

    #[test]
    fn test_header_bad_timestamp_fails() {
        let line = r#"{"timestamp":"2024-03-05 14:07:09","level":"START","programName":"p","PSVersion":"5.1","jsonLoggerVersion":"1.0"}"#;
        let err = parse_header(line).unwrap_err();

        assert!(matches!(err, Error::InvalidHeader(_)));
        assert!(err.to_string().contains("Malformed timestamp"));
    }

    #[test]
    fn test_header_with_bom_needs_stripping() {
        let with_bom = format!("{}{}", UTF8_BOM, HEADER);

        assert!(parse_header(&with_bom).is_err());
        assert_eq!(
            parse_header(strip_bom(&with_bom)).unwrap(),
            parse_header(HEADER).unwrap()
        );
    }

    #[test]
    fn test_strip_bom_leaves_plain_lines() {
        assert_eq!(strip_bom("{}"), "{}");
        assert_eq!(strip_bom("\u{feff}{}"), "{}");
    }

    #[test]
    fn test_body_matches_with_called_from() {
        let line = r#"{"timestamp":"2024-03-05T14:07:10-05:00","level":"INFO","message":"copied 3 users","calledFrom":"Sync-Users.ps1:42"}"#;

        match match_body(line) {
            BodyMatch::Matched(body) => {
                assert_eq!(body.called_from, "Sync-Users.ps1:42");
                assert_eq!(body.message, "copied 3 users");
            }
            BodyMatch::NotBody(reason) => panic!("expected body, got NotBody({})", reason),
        }
    }

    #[test]
    fn test_body_missing_called_from_is_negative_match() {
        let line = r#"{"timestamp":"2024-03-05T14:07:10-05:00","level":"INFO","message":"x"}"#;
        assert!(matches!(match_body(line), BodyMatch::NotBody(_)));
    }

    #[test]
    fn test_body_empty_called_from_is_negative_match() {
        let line = r#"{"level":"INFO","message":"x","calledFrom":""}"#;
        assert!(matches!(match_body(line), BodyMatch::NotBody(_)));
    }

    #[test]
    fn test_body_invalid_json_is_negative_match() {
        assert!(matches!(match_body("not json"), BodyMatch::NotBody(_)));
    }

    #[test]
    fn test_parse_line_falls_back_to_footer() {
        let line = r#"{"timestamp":"2024-03-05T14:09:00-05:00","level":"END","Message":"done"}"#;
        let record = parse_line(line).unwrap();

        assert_eq!(record.kind(), RecordKind::Footer);
        match record {
            LogRecord::Footer(footer) => assert_eq!(footer.message.as_deref(), Some("done")),
            other => panic!("expected footer, got {:?}", other),
        }
    }

    #[test]
    fn test_footer_accepts_lowercase_message() {
        let line = r#"{"timestamp":"2024-03-05T14:09:00-05:00","level":"END","message":"bye"}"#;
        assert_eq!(parse_footer(line).unwrap().message.as_deref(), Some("bye"));
    }

    #[test]
    fn test_footer_message_is_optional() {
        let line = r#"{"timestamp":"2024-03-05T14:09:00-05:00","level":"END"}"#;
        assert_eq!(parse_footer(line).unwrap().message, None);
    }

    #[test]
    fn test_parse_line_unparseable() {
        let line = r#"{"message":"orphan","calledFrom":""}"#;
        let err = parse_line(line).unwrap_err();

        assert!(matches!(err, Error::UnparseableLine { .. }));
    }

    #[test]
    fn test_blank_line_is_unparseable() {
        assert!(matches!(
            parse_line("").unwrap_err(),
            Error::UnparseableLine { .. }
        ));
    }

    #[test]
    fn test_repeated_header_after_first_line_reads_as_footer() {
        let record = parse_line(HEADER).unwrap();
        assert_eq!(record.kind(), RecordKind::Footer);
    }

    #[test]
    fn test_body_with_off_layout_timestamp_is_negative_match() {
        let line = r#"{"timestamp":"2024-03-05T14:07:09-0500","calledFrom":"a.ps1:1"}"#;
        assert!(matches!(match_body(line), BodyMatch::NotBody(_)));
    }
}
