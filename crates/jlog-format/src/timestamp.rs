use chrono::{DateTime, FixedOffset, Timelike, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::{Error, Result};

/// Layout written by the JSON logger: RFC 3339 with up to nine fractional
/// digits and a mandatory numeric offset (`Z` is not accepted).
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

// chrono's parser tolerates padding, signs, colon-less offsets and long
// fractions, so the exact shape is checked first
static TIMESTAMP_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,9})?[+-][0-9]{2}:[0-9]{2}$")
        .unwrap()
});

/// Parse a logger timestamp into an instant, keeping its offset.
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>> {
    let malformed = |reason: &str| Error::MalformedTimestamp {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if !TIMESTAMP_SHAPE.is_match(input) {
        return Err(malformed("does not match YYYY-MM-DDTHH:MM:SS[.fraction]±HH:MM"));
    }

    let instant =
        DateTime::parse_from_str(input, TIMESTAMP_LAYOUT).map_err(|e| malformed(&e.to_string()))?;

    // chrono represents second 60 as a nanosecond overflow
    if instant.nanosecond() >= 1_000_000_000 {
        return Err(malformed("second out of range"));
    }

    Ok(instant)
}

/// Timestamp field of a log record.
///
/// Deserializes from a JSON string through [`parse_timestamp`] and serializes
/// back to the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogTimestamp(DateTime<FixedOffset>);

impl LogTimestamp {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

impl FromStr for LogTimestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_timestamp(s).map(Self)
    }
}

impl fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_LAYOUT))
    }
}

impl Serialize for LogTimestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogTimestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
