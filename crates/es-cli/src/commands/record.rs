//! Record command for storing a single status change.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use es_core::StatusEvent;
use es_core::event::parse_time_of_day;
use es_db::{Database, StatusEventRecord};

use crate::Config;
use crate::cli::RecordArgs;

/// Equipment used when neither the flag nor the config names one.
pub const DEFAULT_EQUIPMENT: &str = "default";

/// Stores the change described by `args`.
///
/// Date and time default to `now` on the plant's local clock.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    config: &Config,
    args: &RecordArgs,
    now: NaiveDateTime,
    recorded_at: DateTime<Utc>,
) -> Result<()> {
    let date = args.date.unwrap_or_else(|| now.date());
    let time = match args.time.as_deref() {
        Some(time) => parse_time_of_day(time).context("invalid --time, expected HH:MM")?,
        None => now.time(),
    };
    let equipment = args
        .equipment
        .as_deref()
        .or(config.default_equipment.as_deref())
        .unwrap_or(DEFAULT_EQUIPMENT);
    let operator = args
        .operator
        .clone()
        .unwrap_or_else(|| config.default_operator.clone());

    let mut event = StatusEvent::new(date, time, args.status).with_operator(operator);
    if let Some(note) = &args.note {
        event = event.with_note(note.clone());
    }

    let record = StatusEventRecord::from_event(&event, equipment, recorded_at);
    db.insert_events(std::slice::from_ref(&record))?;
    tracing::debug!(id = %record.id, equipment, "recorded status change");

    writeln!(
        writer,
        "Recorded {} for {equipment} at {} {}.",
        event.status,
        record.date,
        record.time
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, TimeZone};
    use es_core::Status;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 2)
            .unwrap()
            .and_hms_opt(16, 4, 37)
            .unwrap()
    }

    fn recorded_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 2, 8, 4, 37).unwrap()
    }

    fn args(status: Status) -> RecordArgs {
        RecordArgs {
            status,
            date: None,
            time: None,
            equipment: None,
            note: None,
            operator: None,
        }
    }

    #[test]
    fn defaults_to_now_and_configured_names() {
        let mut db = Database::open_in_memory().unwrap();
        let config = Config::default();
        let mut output = Vec::new();

        run(
            &mut output,
            &mut db,
            &config,
            &args(Status::Maintenance),
            now(),
            recorded_at(),
        )
        .unwrap();

        let records = db.list_records(None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].equipment, DEFAULT_EQUIPMENT);
        assert_eq!(records[0].date, "2025-07-02");
        assert_eq!(records[0].time, "16:04");
        assert_eq!(records[0].status, "maintenance");
        assert_eq!(records[0].operator, "unknown");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Recorded maintenance for default at 2025-07-02 16:04.\n"
        );
    }

    #[test]
    fn explicit_fields_are_stored() {
        let mut db = Database::open_in_memory().unwrap();
        let config = Config::default();
        let args = RecordArgs {
            date: NaiveDate::from_ymd_opt(2025, 7, 1),
            time: Some("18:30".to_string()),
            equipment: Some("press-1".to_string()),
            note: Some("restart after cleaning".to_string()),
            operator: Some("wang".to_string()),
            ..args(Status::Running)
        };

        run(&mut Vec::new(), &mut db, &config, &args, now(), recorded_at()).unwrap();

        let events = db.status_events(Some("press-1")).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].instant().to_string(), "2025-07-01 18:30:00");
        assert_eq!(events[0].note.as_deref(), Some("restart after cleaning"));
        assert_eq!(events[0].operator, "wang");
    }

    #[test]
    fn invalid_time_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        let args = RecordArgs {
            time: Some("noon".to_string()),
            ..args(Status::Running)
        };
        let result = run(
            &mut Vec::new(),
            &mut db,
            &Config::default(),
            &args,
            now(),
            recorded_at(),
        );
        assert!(result.is_err());
        assert!(db.list_records(None).unwrap().is_empty());
    }
}
