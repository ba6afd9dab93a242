//! Shared utilities for CLI commands.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use es_core::StatusEvent;
use es_db::Database;

use crate::Config;
use crate::cli::QueryArgs;

/// The event snapshot a reporting command works on.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub equipment: Option<String>,
    pub events: Vec<StatusEvent>,
}

impl Snapshot {
    /// Title used in report headers.
    pub fn label(&self) -> &str {
        self.equipment.as_deref().unwrap_or("all equipment")
    }
}

/// Picks the equipment to report on.
///
/// Falls back to the configured default, then to the only equipment in the
/// database. Mixing several timelines into one would produce nonsense
/// dwell times, so more than one candidate is an error.
pub fn resolve_equipment(
    db: &Database,
    config: &Config,
    explicit: Option<&str>,
) -> Result<Option<String>> {
    if let Some(equipment) = explicit.or(config.default_equipment.as_deref()) {
        return Ok(Some(equipment.to_string()));
    }

    let known = db.list_equipment()?;
    match known.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(only.equipment.clone())),
        _ => {
            let names: Vec<_> = known.iter().map(|e| e.equipment.as_str()).collect();
            bail!(
                "multiple equipment recorded ({}); pass --equipment",
                names.join(", ")
            )
        }
    }
}

/// Loads the event snapshot selected by `args`.
pub fn load_snapshot(db: &Database, config: &Config, args: &QueryArgs) -> Result<Snapshot> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            bail!("--from {from} is after --to {to}");
        }
    }

    let equipment = resolve_equipment(db, config, args.equipment.as_deref())?;
    let events = db.status_events(equipment.as_deref())?;
    let loaded = events.len();
    let events = filter_by_date(events, args.from, args.to);
    tracing::debug!(
        equipment = equipment.as_deref().unwrap_or("-"),
        loaded,
        selected = events.len(),
        "loaded event snapshot"
    );

    Ok(Snapshot { equipment, events })
}

/// Keeps events dated within `[from, to]`. Missing bounds are open.
pub fn filter_by_date(
    mut events: Vec<StatusEvent>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<StatusEvent> {
    events.retain(|event| {
        from.is_none_or(|from| event.date >= from) && to.is_none_or(|to| event.date <= to)
    });
    events
}

/// Generates a 10-character progress bar for a percentage.
/// Non-zero values below 5% get a single block for visibility.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(percentage: f64) -> String {
    if !percentage.is_finite() || percentage <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let filled = if percentage < 5.0 {
        1
    } else {
        (percentage / 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    use es_db::StatusEventRecord;

    fn record(id: &str, equipment: &str, date: &str, time: &str) -> StatusEventRecord {
        StatusEventRecord {
            id: id.to_string(),
            equipment: equipment.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            status: "running".to_string(),
            note: None,
            operator: "test".to_string(),
            recorded_at: "2025-07-02T00:00:00Z".to_string(),
        }
    }

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn explicit_equipment_wins() {
        let db = Database::open_in_memory().unwrap();
        let config = Config {
            default_equipment: Some("kiln-2".to_string()),
            ..Config::default()
        };
        assert_eq!(
            resolve_equipment(&db, &config, Some("press-1")).unwrap(),
            Some("press-1".to_string())
        );
        assert_eq!(
            resolve_equipment(&db, &config, None).unwrap(),
            Some("kiln-2".to_string())
        );
    }

    #[test]
    fn single_known_equipment_is_used() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_events(&[record("a", "press-1", "2025-07-02", "08:00")])
            .unwrap();
        assert_eq!(
            resolve_equipment(&db, &config(), None).unwrap(),
            Some("press-1".to_string())
        );
    }

    #[test]
    fn ambiguous_equipment_is_an_error() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_events(&[
            record("a", "press-1", "2025-07-02", "08:00"),
            record("b", "kiln-2", "2025-07-02", "09:00"),
        ])
        .unwrap();
        let err = resolve_equipment(&db, &config(), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "multiple equipment recorded (kiln-2, press-1); pass --equipment"
        );
    }

    #[test]
    fn empty_database_has_no_equipment() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(resolve_equipment(&db, &config(), None).unwrap(), None);
    }

    #[test]
    fn date_filter_is_inclusive() {
        let events = vec![
            StatusEvent::parse("2025-07-01", "23:59", "running").unwrap(),
            StatusEvent::parse("2025-07-02", "00:00", "running").unwrap(),
            StatusEvent::parse("2025-07-03", "23:59", "running").unwrap(),
            StatusEvent::parse("2025-07-04", "00:00", "running").unwrap(),
        ];
        let kept = filter_by_date(
            events,
            NaiveDate::from_ymd_opt(2025, 7, 2),
            NaiveDate::from_ymd_opt(2025, 7, 3),
        );
        let dates: Vec<_> = kept.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-07-02", "2025-07-03"]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let args = QueryArgs {
            from: NaiveDate::from_ymd_opt(2025, 7, 3),
            to: NaiveDate::from_ymd_opt(2025, 7, 1),
            ..QueryArgs::default()
        };
        assert!(load_snapshot(&db, &config(), &args).is_err());
    }

    #[test]
    fn progress_bar_scales_to_ten_blocks() {
        assert_eq!(progress_bar(0.0), "░░░░░░░░░░");
        assert_eq!(progress_bar(2.0), "█░░░░░░░░░");
        assert_eq!(progress_bar(89.6), "█████████░");
        assert_eq!(progress_bar(100.0), "██████████");
    }
}
