//! Interval reconstruction.
//!
//! Turns an unordered snapshot of status changes into dwell periods.
//!
//! # Algorithm Summary
//!
//! 1. Sort events ascending by instant. The sort is stable, so events sharing
//!    an instant keep their input order.
//! 2. For each event except the last, measure the gap to the next event and
//!    classify it (measured, non-positive, or beyond the cap).
//! 3. The last event is left open.
//! 4. Return newest-first for display.

use crate::event::StatusEvent;
use crate::interval::{Dwell, Interval};

/// Gaps shorter than this are not a measurable dwell.
pub const MIN_POSITIVE_GAP_MINUTES: i64 = 1;

/// Default plausibility cap for a single dwell (24 hours).
///
/// Operators log status at least daily; a longer silence is sparse logging,
/// not evidence that the equipment held one state the whole time.
pub const MAX_PLAUSIBLE_GAP_MINUTES: u32 = 24 * 60;

/// Configuration for interval reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructConfig {
    /// Longest gap, in minutes, that still counts as a measured dwell.
    /// Default: 1440 (24 hours).
    pub max_gap_minutes: u32,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            max_gap_minutes: MAX_PLAUSIBLE_GAP_MINUTES,
        }
    }
}

impl ReconstructConfig {
    /// Classifies the gap between an event and its chronological successor.
    pub fn classify_gap(&self, gap_minutes: i64) -> Dwell {
        if gap_minutes < MIN_POSITIVE_GAP_MINUTES {
            return Dwell::NonPositiveGap { gap_minutes };
        }
        if gap_minutes > i64::from(self.max_gap_minutes) {
            return Dwell::ExceedsCap { gap_minutes };
        }
        u32::try_from(gap_minutes)
            .map_or(Dwell::ExceedsCap { gap_minutes }, |minutes| {
                Dwell::Measured { minutes }
            })
    }
}

/// Events in ascending chronological order, ties in input order.
pub fn chronological(events: &[StatusEvent]) -> Vec<&StatusEvent> {
    let mut ordered: Vec<&StatusEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.instant());
    ordered
}

/// The most recent event under the same ordering as [`chronological`].
///
/// Among events sharing the latest instant, the last one in input order wins.
pub fn latest(events: &[StatusEvent]) -> Option<&StatusEvent> {
    events.iter().max_by_key(|event| event.instant())
}

/// Reconstructs dwell intervals, newest first.
pub fn reconstruct_intervals(events: &[StatusEvent], config: &ReconstructConfig) -> Vec<Interval> {
    let ordered = chronological(events);
    let mut intervals = Vec::with_capacity(ordered.len());

    for (idx, event) in ordered.iter().enumerate() {
        let dwell = match ordered.get(idx + 1) {
            Some(next) => {
                let gap_minutes = (next.instant() - event.instant()).num_minutes();
                let dwell = config.classify_gap(gap_minutes);
                if dwell.minutes().is_none() {
                    tracing::trace!(
                        instant = %event.instant(),
                        gap_minutes,
                        kind = dwell.kind(),
                        "indeterminate dwell"
                    );
                }
                dwell
            }
            None => Dwell::Open,
        };
        intervals.push(Interval {
            event: (*event).clone(),
            dwell,
        });
    }

    intervals.reverse();
    intervals
}
