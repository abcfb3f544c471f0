//! External time formats.
//!
//! Durations travel as whole minutes, timestamps as `dd.MM.yyyy HH:mm`
//! (chrono pattern `%d.%m.%Y %H:%M`). Both the persistence codec and the
//! CLI's JSON output use these forms.

use chrono::{Duration, NaiveDateTime};

/// Timestamp pattern, e.g. `02.06.2025 10:30`.
pub const STAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub fn format_stamp(value: NaiveDateTime) -> String {
    value.format(STAMP_FORMAT).to_string()
}

pub fn parse_stamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), STAMP_FORMAT).ok()
}

pub fn format_minutes(value: Duration) -> String {
    value.num_minutes().to_string()
}

pub fn parse_minutes(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(Duration::try_minutes)
}

/// Serde adapter for `Option<Duration>` as whole minutes.
pub mod minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_some(&duration.num_minutes()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<i64>::deserialize(deserializer)? {
            Some(minutes) => Duration::try_minutes(minutes)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("duration out of range")),
            None => Ok(None),
        }
    }
}

/// Serde adapter for `Option<NaiveDateTime>` in the stamp format.
pub mod stamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(stamp) => serializer.serialize_some(&super::format_stamp(*stamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_stamp(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn stamp_round_trips() {
        let value = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let text = format_stamp(value);
        assert_eq!(text, "02.06.2025 10:30");
        assert_eq!(parse_stamp(&text), Some(value));
    }

    #[test]
    fn stamp_rejects_other_patterns() {
        assert_eq!(parse_stamp("2025-06-02T10:30:00"), None);
        assert_eq!(parse_stamp(""), None);
    }

    #[test]
    fn minutes_round_trip() {
        let duration = Duration::minutes(90);
        assert_eq!(format_minutes(duration), "90");
        assert_eq!(parse_minutes("90"), Some(duration));
    }

    #[test]
    fn minutes_rejects_garbage() {
        assert_eq!(parse_minutes("ninety"), None);
        assert_eq!(parse_minutes(""), None);
    }
}
