//! Status command for showing the current status and time since the last change.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use es_core::{CurrentStatus, current_status};
use es_db::Database;
use serde::Serialize;

use super::util::resolve_equipment;
use crate::Config;

/// Current status as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonCurrentStatus {
    pub equipment: Option<String>,
    pub date: String,
    pub time: String,
    pub status: String,
    pub note: Option<String>,
    pub operator: String,
    pub elapsed_minutes: u32,
    pub elapsed: String,
}

impl JsonCurrentStatus {
    fn new(equipment: Option<String>, current: &CurrentStatus) -> Self {
        let event = &current.event;
        Self {
            equipment,
            date: event.date.format("%Y-%m-%d").to_string(),
            time: event.time.format("%H:%M").to_string(),
            status: event.status.to_string(),
            note: event.note.clone(),
            operator: event.operator.clone(),
            elapsed_minutes: current.elapsed_minutes,
            elapsed: current.elapsed_label(),
        }
    }
}

/// Prints the status of the most recent event relative to `now`.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    config: &Config,
    equipment: Option<&str>,
    json: bool,
    now: NaiveDateTime,
) -> Result<()> {
    let equipment = resolve_equipment(db, config, equipment)?;
    let events = db.status_events(equipment.as_deref())?;
    let current = current_status(&events, now);

    if json {
        let payload = current
            .as_ref()
            .map(|current| JsonCurrentStatus::new(equipment.clone(), current));
        writeln!(writer, "{}", serde_json::to_string_pretty(&payload)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "CURRENT STATUS: {}",
        equipment.as_deref().unwrap_or("all equipment")
    )?;
    writeln!(writer)?;

    let Some(current) = current else {
        writeln!(writer, "No current record.")?;
        return Ok(());
    };

    let event = &current.event;
    writeln!(writer, "Status:    {}", event.status)?;
    writeln!(writer, "Since:     {}", event.instant().format("%Y-%m-%d %H:%M"))?;
    writeln!(writer, "Elapsed:   {}", current.elapsed_label())?;
    if !event.operator.is_empty() {
        writeln!(writer, "Operator:  {}", event.operator)?;
    }
    if let Some(note) = &event.note {
        writeln!(writer, "Note:      {note}")?;
    }

    Ok(())
}
