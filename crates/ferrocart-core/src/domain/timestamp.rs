use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::{CalendarDate, SchemaError};

/// Instant on the wire as RFC3339 with a `Z` suffix. Offsets other than UTC
/// are rejected rather than converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        match OffsetDateTime::parse(input.trim(), &Rfc3339) {
            Ok(value) if value.offset() == UtcOffset::UTC => Ok(Self(value)),
            _ => Err(SchemaError::timestamp_not_utc(input)),
        }
    }

    /// Calendar day this instant falls on.
    pub fn date(self) -> CalendarDate {
        CalendarDate::new(self.0.date())
    }
}

impl FromStr for UtcDateTime {
    type Err = SchemaError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl TryFrom<String> for UtcDateTime {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UtcDateTime> for String {
    fn from(value: UtcDateTime) -> Self {
        value.to_string()
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Years outside 0..=9999 have no RFC3339 form.
        match self.0.format(&Rfc3339) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.0.unix_timestamp()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_zulu_timestamps() {
        let parsed: UtcDateTime = "2024-01-01T00:00:00Z".parse().expect("must parse");

        assert_eq!(parsed.to_string(), "2024-01-01T00:00:00Z");
        assert_eq!(parsed.date().to_string(), "2024-01-01");
    }

    #[test]
    fn offsets_other_than_utc_are_rejected() {
        let err = UtcDateTime::parse("2024-01-01T01:00:00+01:00").expect_err("must fail");
        assert!(matches!(err, SchemaError::TimestampNotUtc { .. }));
    }

    #[test]
    fn deserializes_only_utc() {
        let ok = serde_json::from_str::<UtcDateTime>("\"2024-06-30T23:59:59Z\"");
        let bad = serde_json::from_str::<UtcDateTime>("\"2024-06-30 23:59\"");

        assert!(ok.is_ok());
        assert!(bad.is_err());
    }
}
