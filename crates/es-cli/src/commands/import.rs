//! Import command for ingesting status changes into the local `SQLite` store.
//!
//! Each stdin line is one JSON object:
//!
//! ```json
//! {"date": "2025-07-02", "time": "08:00", "status": "running", "operator": "li"}
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use es_core::StatusEvent;
use es_db::{Database, StatusEventRecord};

use super::record::DEFAULT_EQUIPMENT;
use crate::Config;
use crate::cli::ImportArgs;

pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    db: &mut Database,
    config: &Config,
    args: &ImportArgs,
    recorded_at: DateTime<Utc>,
) -> Result<usize> {
    let default_equipment = args
        .equipment
        .as_deref()
        .or(config.default_equipment.as_deref())
        .unwrap_or(DEFAULT_EQUIPMENT);
    let records = parse_events(reader, default_equipment, config, recorded_at)?;
    let inserted = db.insert_events(&records)?;

    writeln!(
        writer,
        "Imported {inserted} of {} status events.",
        records.len()
    )?;
    Ok(inserted)
}

fn parse_events<R: BufRead>(
    reader: R,
    default_equipment: &str,
    config: &Config,
    recorded_at: DateTime<Utc>,
) -> Result<Vec<StatusEventRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed: ImportEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
        let record = parsed
            .into_record(default_equipment, config, recorded_at)
            .with_context(|| format!("invalid event on line {}", idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ImportEvent {
    #[serde(default)]
    id: Option<String>,
    date: String,
    time: String,
    status: String,
    #[serde(default)]
    equipment: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    operator: Option<String>,
}

impl ImportEvent {
    fn into_record(
        self,
        default_equipment: &str,
        config: &Config,
        recorded_at: DateTime<Utc>,
    ) -> Result<StatusEventRecord> {
        let mut event = StatusEvent::parse(&self.date, &self.time, &self.status)?
            .with_operator(
                self.operator
                    .unwrap_or_else(|| config.default_operator.clone()),
            );
        if let Some(note) = self.note {
            event = event.with_note(note);
        }

        let equipment = self.equipment.as_deref().unwrap_or(default_equipment);
        let mut record = StatusEventRecord::from_event(&event, equipment, recorded_at);
        if let Some(id) = self.id.filter(|id| !id.trim().is_empty()) {
            record.id = id;
        }
        Ok(record)
    }
}
