use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use crate::SchemaError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar day serialized as an ISO date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Current UTC calendar day.
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        Date::parse(input.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| SchemaError::invalid_date(input))
    }

    /// Returns the day `days` before this one, saturating at the minimum date.
    pub fn days_before(self, days: i64) -> Self {
        Self(self.0.checked_sub(Duration::days(days)).unwrap_or(Date::MIN))
    }

    /// The `days` calendar days ending yesterday, oldest first.
    pub fn trailing_window(days: u32) -> Vec<Self> {
        let today = Self::today();
        (1..=i64::from(days))
            .rev()
            .map(|offset| today.days_before(offset))
            .collect()
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .unwrap_or_else(|_| self.0.to_string())
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
