//! Summary command: time spent per status, with percentage share.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use es_core::{StatusSummary, summarize};
use es_db::Database;

use super::util::{Snapshot, load_snapshot, progress_bar};
use crate::Config;
use crate::cli::QueryArgs;

pub fn run<W: Write>(writer: &mut W, db: &Database, config: &Config, args: &QueryArgs) -> Result<()> {
    let snapshot = load_snapshot(db, config, args)?;
    let summary = summarize(&snapshot.events, &config.reconstruct_config());

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        let period = period_bounds(&snapshot, args);
        write_summary(writer, &snapshot, period, &summary)?;
    }
    Ok(())
}

/// Reported date range: the requested bounds, else the snapshot's own span.
fn period_bounds(snapshot: &Snapshot, args: &QueryArgs) -> Option<(NaiveDate, NaiveDate)> {
    let first = snapshot.events.iter().map(|e| e.date).min();
    let last = snapshot.events.iter().map(|e| e.date).max();
    Some((args.from.or(first)?, args.to.or(last)?))
}

/// Writes the human-readable summary.
pub fn write_summary<W: Write>(
    writer: &mut W,
    snapshot: &Snapshot,
    period: Option<(NaiveDate, NaiveDate)>,
    summary: &StatusSummary,
) -> std::io::Result<()> {
    writeln!(writer, "STATUS SUMMARY: {}", snapshot.label())?;

    if summary.categories.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "No status changes recorded.")?;
        return Ok(());
    }

    if let Some((from, to)) = period {
        writeln!(writer, "Period: {from} to {to}")?;
    }
    writeln!(writer)?;

    writeln!(
        writer,
        "{:<11}  {:>5}  {:>6}  {:>6}",
        "Status", "Count", "Hours", "Share"
    )?;
    writeln!(writer, "───────────  ─────  ──────  ──────")?;
    for category in &summary.categories {
        writeln!(
            writer,
            "{:<11}  {:>5}  {:>6.2}  {:>5.1}%  {}",
            category.status.as_str(),
            category.count,
            category.total_hours,
            category.percentage,
            progress_bar(category.percentage)
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "Total tracked:  {:.2}h", summary.total_hours)?;
    writeln!(writer, "Events:         {}", summary.event_count)?;
    Ok(())
}
