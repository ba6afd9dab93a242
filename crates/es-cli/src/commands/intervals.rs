//! Intervals command: the reconstructed dwell timeline, newest first.

use std::io::Write;

use anyhow::Result;
use es_core::{Dwell, Interval, format_minutes, reconstruct_intervals};
use es_db::Database;
use serde::Serialize;

use super::util::{Snapshot, load_snapshot};
use crate::Config;
use crate::cli::QueryArgs;

/// One interval as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonInterval {
    pub date: String,
    pub time: String,
    pub status: String,
    pub note: Option<String>,
    pub operator: String,
    pub duration_minutes: Option<u32>,
    pub duration: Option<String>,
    pub dwell: &'static str,
}

impl From<&Interval> for JsonInterval {
    fn from(interval: &Interval) -> Self {
        let event = &interval.event;
        Self {
            date: event.date.format("%Y-%m-%d").to_string(),
            time: event.time.format("%H:%M").to_string(),
            status: event.status.to_string(),
            note: event.note.clone(),
            operator: event.operator.clone(),
            duration_minutes: interval.duration_minutes(),
            duration: interval.duration_label(),
            dwell: interval.dwell.kind(),
        }
    }
}

pub fn run<W: Write>(writer: &mut W, db: &Database, config: &Config, args: &QueryArgs) -> Result<()> {
    let snapshot = load_snapshot(db, config, args)?;
    let intervals = reconstruct_intervals(&snapshot.events, &config.reconstruct_config());

    if args.json {
        let rows: Vec<JsonInterval> = intervals.iter().map(JsonInterval::from).collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write_intervals(writer, &snapshot, &intervals, config.max_gap_minutes)?;
    }
    Ok(())
}

/// Display text for a dwell in the human-readable table.
fn dwell_label(dwell: &Dwell, max_gap_minutes: u32) -> String {
    match dwell {
        Dwell::Measured { minutes } => format_minutes(*minutes),
        Dwell::Open => "(open)".to_string(),
        Dwell::NonPositiveGap { .. } => "(same time)".to_string(),
        Dwell::ExceedsCap { .. } => format!("(> {})", format_minutes(max_gap_minutes)),
    }
}

/// Writes the human-readable interval table.
pub fn write_intervals<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    intervals: &[Interval],
    max_gap_minutes: u32,
) -> std::io::Result<()> {
    writeln!(writer, "INTERVALS: {}", snapshot.label())?;
    writeln!(writer)?;

    if intervals.is_empty() {
        writeln!(writer, "No status changes recorded.")?;
        return Ok(());
    }

    let header = format!(
        "{:<10}  {:<5}  {:<11}  {:<11}  {:<10}  Note",
        "Date", "Time", "Status", "Duration", "Operator"
    );
    writeln!(writer, "{header}")?;
    writeln!(
        writer,
        "──────────  ─────  ───────────  ───────────  ──────────  ────"
    )?;

    for interval in intervals {
        let event = &interval.event;
        let line = format!(
            "{:<10}  {:<5}  {:<11}  {:<11}  {:<10}  {}",
            event.date.format("%Y-%m-%d").to_string(),
            event.time.format("%H:%M").to_string(),
            event.status.as_str(),
            dwell_label(&interval.dwell, max_gap_minutes),
            event.operator,
            event.note.as_deref().unwrap_or_default(),
        );
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}
