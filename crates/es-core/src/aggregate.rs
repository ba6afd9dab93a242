//! Per-status rollup of reconstructed intervals.

use serde::Serialize;

use crate::duration::{format_minutes, parse_hours};
use crate::event::StatusEvent;
use crate::interval::Interval;
use crate::reconstruct::{ReconstructConfig, reconstruct_intervals};
use crate::status::Status;

/// Rollup for one status category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusAggregate {
    pub status: Status,
    /// Occurrences of this status, including indeterminate dwells.
    pub count: usize,
    /// Sum of determinate dwells, read back through the duration codec.
    pub total_hours: f64,
    /// Share of `total_hours` across all categories, 0 when nothing was measured.
    pub percentage: f64,
}

/// Result of aggregating one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSummary {
    /// Categories in [`Status::DISPLAY_ORDER`], empty ones omitted.
    pub categories: Vec<StatusAggregate>,
    /// Sum of `total_hours` over all categories.
    pub total_hours: f64,
    /// Number of intervals aggregated.
    pub event_count: usize,
}

impl StatusSummary {
    pub fn category(&self, status: Status) -> Option<&StatusAggregate> {
        self.categories.iter().find(|c| c.status == status)
    }
}

/// Hours an interval contributes: its display form parsed back, or zero.
fn contributed_hours(interval: &Interval) -> f64 {
    interval
        .duration_minutes()
        .map_or(0.0, |minutes| parse_hours(&format_minutes(minutes)))
}

/// Aggregates intervals (in any order) by status.
pub fn aggregate(intervals: &[Interval]) -> StatusSummary {
    let mut categories: Vec<StatusAggregate> = Status::DISPLAY_ORDER
        .iter()
        .filter_map(|&status| {
            let mut count = 0;
            let mut total_hours = 0.0;
            for interval in intervals.iter().filter(|i| i.event.status == status) {
                count += 1;
                total_hours += contributed_hours(interval);
            }
            (count > 0).then_some(StatusAggregate {
                status,
                count,
                total_hours,
                percentage: 0.0,
            })
        })
        .collect();

    let total_hours: f64 = categories.iter().map(|c| c.total_hours).sum();
    if total_hours > 0.0 {
        for category in &mut categories {
            category.percentage = category.total_hours / total_hours * 100.0;
        }
    }

    tracing::debug!(
        categories = categories.len(),
        total_hours,
        event_count = intervals.len(),
        "aggregated intervals"
    );

    StatusSummary {
        categories,
        total_hours,
        event_count: intervals.len(),
    }
}

/// Reconstructs and aggregates a snapshot in one step.
pub fn summarize(events: &[StatusEvent], config: &ReconstructConfig) -> StatusSummary {
    aggregate(&reconstruct_intervals(events, config))
}
