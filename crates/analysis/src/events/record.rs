use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A parsed event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Timestamp with an explicit UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// Timestamp without offset information.
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// Returns the UTC offset as `±HHMM`, if the timestamp carries one.
    #[must_use]
    pub fn utc_offset(&self) -> Option<String> {
        match self {
            Self::Zoned(time) => Some(time.format("%z").to_string()),
            Self::Naive(_) => None,
        }
    }
}

const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y/%m/%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Parses an event timestamp, trying offset-bearing forms first.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS±HHMM` (with or without a colon in
/// the offset), the same without an offset, and bare dates.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(Timestamp::Zoned(time));
    }
    for format in ZONED_FORMATS {
        if let Ok(time) = DateTime::parse_from_str(text, format) {
            return Some(Timestamp::Zoned(time));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Timestamp::Naive(time));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Timestamp::Naive)
}

/// A CSV row as written in the file.
#[derive(Debug, Deserialize)]
pub(super) struct Row {
    pub user_id: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub event_action: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub total_influence: Option<f64>,
}

/// One user event with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub user_id: String,
    pub time: Option<Timestamp>,
    pub location: String,
    /// Text of `location` before the first comma.
    pub city: String,
    pub country: String,
    pub action: Option<String>,
    pub total_influence: Option<f64>,
}

impl Event {
    pub(super) fn from_row(row: Row) -> Self {
        let city = city_of(&row.location).to_string();
        let action = Some(row.event_action.trim())
            .filter(|action| !action.is_empty())
            .map(str::to_string);

        Self {
            user_id: row.user_id.trim().to_string(),
            time: parse_timestamp(&row.event_time),
            city,
            location: row.location,
            country: row.country.trim().to_string(),
            action,
            total_influence: row.total_influence.filter(|value| value.is_finite()),
        }
    }

    /// Returns the event's UTC offset as `±HHMM`.
    #[must_use]
    pub fn utc_offset(&self) -> Option<String> {
        self.time.as_ref().and_then(Timestamp::utc_offset)
    }
}

fn city_of(location: &str) -> &str {
    location.split(',').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_forms() {
        for text in [
            "2024-03-01T09:30:00+08:00",
            "2024-03-01 09:30:00+0800",
            "2024-03-01 09:30:00+08:00",
            "2024-03-01 09:30:00.250+08:00",
        ] {
            let parsed = parse_timestamp(text).unwrap_or_else(|| panic!("failed on {text}"));
            assert_eq!(parsed.utc_offset().as_deref(), Some("+0800"), "{text}");
        }

        let west = parse_timestamp("2024-03-01 09:30:00-0530").unwrap();
        assert_eq!(west.utc_offset().as_deref(), Some("-0530"));
    }

    #[test]
    fn naive_forms_have_no_offset() {
        for text in ["2024-03-01 09:30:00", "2024-03-01T09:30:00", "2024-03-01"] {
            let parsed = parse_timestamp(text).unwrap_or_else(|| panic!("failed on {text}"));
            assert!(matches!(parsed, Timestamp::Naive(_)), "{text}");
            assert_eq!(parsed.utc_offset(), None);
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn derives_city_and_action() {
        let event = Event::from_row(Row {
            user_id: " 7 ".into(),
            event_time: "2024-03-01 09:30:00+0900".into(),
            location: "  Tokyo , Kanto".into(),
            country: "Japan".into(),
            event_action: "  ".into(),
            total_influence: Some(12.5),
        });

        assert_eq!(event.user_id, "7");
        assert_eq!(event.city, "Tokyo");
        assert_eq!(event.action, None);
        assert_eq!(event.utc_offset().as_deref(), Some("+0900"));
    }

    #[test]
    fn city_without_state() {
        assert_eq!(city_of("Berlin"), "Berlin");
        assert_eq!(city_of(""), "");
    }
}
