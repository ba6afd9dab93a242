//! Operator-reported status change events.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::{Status, UnknownStatus};

/// Errors raised while building an event from raw row fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The status string is not one of the known categories.
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),

    /// The date is not `YYYY-MM-DD`.
    #[error("invalid date: {value}")]
    InvalidDate { value: String },

    /// The time of day is not `HH:MM` (or `HH:MM:SS`).
    #[error("invalid time of day: {value}")]
    InvalidTime { value: String },
}

/// A single operator-reported status change.
///
/// `date` and `time` together form the event's instant on the plant's local
/// clock. Time of day is kept at minute resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Calendar date of the change.
    pub date: NaiveDate,
    /// Time of day, serialized as `HH:MM`.
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    /// The status the equipment entered.
    pub status: Status,
    /// Free text from the operator. Not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Who recorded the change. Not interpreted.
    #[serde(default)]
    pub operator: String,
}

impl StatusEvent {
    /// Creates an event, truncating the time of day to whole minutes.
    pub fn new(date: NaiveDate, time: NaiveTime, status: Status) -> Self {
        Self {
            date,
            time: truncate_to_minute(time),
            status,
            note: None,
            operator: String::new(),
        }
    }

    /// Builds an event from the raw string fields of a stored row.
    pub fn parse(date: &str, time: &str, status: &str) -> Result<Self, EventError> {
        let date = parse_date(date)?;
        let time = parse_time_of_day(time)?;
        let status = status.parse::<Status>()?;
        Ok(Self::new(date, time, status))
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }

    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }

    /// The absolute instant of this event.
    pub fn instant(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Result<NaiveDate, EventError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| EventError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parses a time of day in `HH:MM` form. Seconds are accepted and dropped.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, EventError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map(truncate_to_minute)
        .map_err(|_| EventError::InvalidTime {
            value: value.to_string(),
        })
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Serde adapter for `HH:MM` times of day.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_time_of_day(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_builds_event_from_row_fields() {
        let event = StatusEvent::parse("2025-07-02", "08:00", "running").unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 7, 2).unwrap());
        assert_eq!(event.time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(event.status, Status::Running);
        assert!(event.note.is_none());
    }

    #[test]
    fn seconds_are_dropped() {
        let event = StatusEvent::parse("2025-07-02", "08:15:42", "maintenance").unwrap();
        assert_eq!(event.time, NaiveTime::from_hms_opt(8, 15, 0).unwrap());
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert_eq!(
            StatusEvent::parse("2025/07/02", "08:00", "running").unwrap_err(),
            EventError::InvalidDate {
                value: "2025/07/02".to_string()
            }
        );
        assert_eq!(
            StatusEvent::parse("2025-07-02", "25:00", "running").unwrap_err(),
            EventError::InvalidTime {
                value: "25:00".to_string()
            }
        );
        assert!(matches!(
            StatusEvent::parse("2025-07-02", "08:00", "broken").unwrap_err(),
            EventError::UnknownStatus(_)
        ));
    }

    #[test]
    fn blank_note_is_none() {
        let event = StatusEvent::parse("2025-07-02", "08:00", "running")
            .unwrap()
            .with_note("   ");
        assert!(event.note.is_none());
    }

    #[test]
    fn serializes_time_as_hours_and_minutes() {
        let event = StatusEvent::parse("2025-07-02", "18:30", "running")
            .unwrap()
            .with_operator("li");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2025-07-02");
        assert_eq!(json["time"], "18:30");
        assert_eq!(json["status"], "running");
        assert_eq!(json["operator"], "li");
        assert!(json.get("note").is_none());

        let parsed: StatusEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }
}
