/// Timestamp codec for the management API's wire format
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Emitted form: UTC, microsecond precision, no offset
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Accepted form without an offset; the fraction is optional
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A timestamp as the management API writes it.
///
/// The server emits naive UTC times such as `2023-12-01T10:30:00.123456`
/// rather than RFC-3339. Decoding also accepts RFC-3339 with an offset,
/// which is normalised to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InfinityTime(DateTime<Utc>);

impl InfinityTime {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(time)
    }

    /// Parse either wire form
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        if let Ok(time) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(time.with_timezone(&Utc)));
        }
        let naive = NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)?;
        Ok(Self(naive.and_utc()))
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for InfinityTime {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

impl fmt::Display for InfinityTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl Serialize for InfinityTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InfinityTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        InfinityTime::parse(&value)
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {:?}: {}", value, e)))
    }
}
