use super::error::ClockError;
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 时间戳文本格式，24 小时制，全部补零
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static EXACT_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("timestamp shape regex is valid")
});

/// Naive wall-clock time with second resolution. No timezone handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parses user-facing text. Surrounding whitespace is ignored, anything
    /// else must be exactly `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(text: &str) -> Result<Self, ClockError> {
        let trimmed = text.trim();
        if !EXACT_SHAPE.is_match(trimmed) {
            return Err(ClockError::InvalidFormat(trimmed.to_string()));
        }
        Self::parse_shaped(trimmed).ok_or_else(|| ClockError::InvalidFormat(trimmed.to_string()))
    }

    /// Calendar validation for text that already has the fixed-width shape.
    pub(crate) fn parse_shaped(text: &str) -> Option<Self> {
        let dt = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()?;
        // chrono accepts ":60" as a leap second
        if dt.nanosecond() >= 1_000_000_000 {
            return None;
        }
        Some(Self(dt))
    }

    /// Sub-second precision is dropped.
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Signed whole seconds from `earlier` to `self`.
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_seconds()
    }

    pub fn checked_add_secs(&self, secs: i64) -> Option<Self> {
        let delta = TimeDelta::try_seconds(secs)?;
        self.0.checked_add_signed(delta).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn test_parse_and_display() {
        let ts = Timestamp::parse("2024-12-05 09:30:00").unwrap();
        assert_eq!(ts.as_naive().year(), 2024);
        assert_eq!(ts.as_naive().month(), 12);
        assert_eq!(ts.as_naive().hour(), 9);
        assert_eq!(ts.to_string(), "2024-12-05 09:30:00");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let ts: Timestamp = "  2024-12-05 09:30:00\n".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-12-05 09:30:00");
    }

    #[test]
    fn test_parse_rejects_unpadded_fields() {
        assert!(matches!(
            Timestamp::parse("2024-12-5 9:30:00"),
            Err(ClockError::InvalidFormat(_))
        ));
        assert!(Timestamp::parse("2024/12/05 09:30:00").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_calendar_values() {
        assert!(Timestamp::parse("2024-13-01 00:00:00").is_err());
        assert!(Timestamp::parse("2023-02-29 00:00:00").is_err());
        assert!(Timestamp::parse("2024-12-05 24:00:00").is_err());
        assert!(Timestamp::parse("2024-12-31 23:59:60").is_err());
        assert!(Timestamp::parse("2024-02-29 00:00:00").is_ok());
    }

    #[test]
    fn test_seconds_since_and_add() {
        let start = Timestamp::parse("2024-12-05 09:00:00").unwrap();
        let end = start.checked_add_secs(300).unwrap();
        assert_eq!(end.to_string(), "2024-12-05 09:05:00");
        assert_eq!(end.seconds_since(&start), 300);
        assert_eq!(start.seconds_since(&end), -300);
    }

    #[test]
    fn test_from_naive_drops_subseconds() {
        let dt = NaiveDate::from_ymd_opt(2024, 12, 5)
            .unwrap()
            .and_hms_milli_opt(9, 0, 0, 750)
            .unwrap();
        let ts = Timestamp::from_naive(dt);
        assert_eq!(ts, Timestamp::parse("2024-12-05 09:00:00").unwrap());
    }

    #[test]
    fn test_serde_as_text() {
        let ts = Timestamp::parse("2024-12-05 09:30:00").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-12-05 09:30:00\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }
}
