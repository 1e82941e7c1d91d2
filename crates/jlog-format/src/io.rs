use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use crate::parser::{LogRecord, parse_header, parse_line, strip_bom};
use crate::schema::{FooterRecord, HeaderRecord};
use crate::{Error, Result};

/// A line read from a log file, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLine {
    pub number: usize,
    pub text: String,
}

/// Line reader over a log file.
///
/// Strips the byte-order mark from the first line only; line terminators
/// (`\n` or `\r\n`) are removed.
pub struct LogLines<R> {
    lines: Lines<BufReader<R>>,
    next_number: usize,
}

impl LogLines<File> {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> LogLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            next_number: 1,
        }
    }
}

impl<R: Read> Iterator for LogLines<R> {
    type Item = std::io::Result<NumberedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let number = self.next_number;
        self.next_number += 1;

        Some(line.map(|text| {
            let text = if number == 1 {
                strip_bom(&text).to_string()
            } else {
                text
            };
            NumberedLine { number, text }
        }))
    }
}

/// Result of validating a whole file without persisting it.
#[derive(Debug, Clone)]
pub struct LogSummary {
    pub header: HeaderRecord,
    pub body_count: usize,
    pub footer: Option<FooterRecord>,
    pub line_count: usize,
}

/// Parse every line of a log file and summarize it.
///
/// Stops at the first failure; the error carries the offending line number.
pub fn check_log_file(path: &Path) -> Result<LogSummary> {
    let mut lines = LogLines::open(path)?;

    let first = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(Error::InvalidHeader("file is empty".to_string()).at_line(1));
        }
    };
    let header = parse_header(&first.text).map_err(|e| e.at_line(first.number))?;

    let mut body_count = 0;
    let mut footer = None;
    let mut line_count = 1;

    for line in lines {
        let line = line?;
        line_count = line.number;

        match parse_line(&line.text).map_err(|e| e.at_line(line.number))? {
            LogRecord::Body(_) => body_count += 1,
            LogRecord::Footer(f) => footer = Some(f),
        }
    }

    Ok(LogSummary {
        header,
        body_count,
        footer,
        line_count,
    })
}
