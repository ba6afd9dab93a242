//! Derived dwell periods.

use serde::Serialize;

use crate::duration::format_minutes;
use crate::event::StatusEvent;

/// How long the equipment stayed in an event's status.
///
/// Only [`Dwell::Measured`] carries a duration. The other variants are
/// indeterminate: the engine refuses to estimate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dwell {
    /// Whole minutes until the next chronological event.
    Measured { minutes: u32 },
    /// Most recent event; no later event closes it yet.
    Open,
    /// The next event shares or precedes this instant.
    NonPositiveGap { gap_minutes: i64 },
    /// The next event is further away than the plausibility cap.
    ExceedsCap { gap_minutes: i64 },
}

impl Dwell {
    /// Short machine-readable name of the variant.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Measured { .. } => "measured",
            Self::Open => "open",
            Self::NonPositiveGap { .. } => "non_positive_gap",
            Self::ExceedsCap { .. } => "exceeds_cap",
        }
    }

    pub const fn minutes(&self) -> Option<u32> {
        match self {
            Self::Measured { minutes } => Some(*minutes),
            _ => None,
        }
    }
}

/// An event paired with the dwell time it opened.
///
/// Computed fresh from each snapshot and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub event: StatusEvent,
    pub dwell: Dwell,
}

impl Interval {
    /// Determinate duration in minutes, `None` when indeterminate.
    pub const fn duration_minutes(&self) -> Option<u32> {
        self.dwell.minutes()
    }

    /// Duration in its display form, e.g. `"2h 30m"`.
    pub fn duration_label(&self) -> Option<String> {
        self.duration_minutes().map(format_minutes)
    }

    pub const fn is_determinate(&self) -> bool {
        self.duration_minutes().is_some()
    }
}
