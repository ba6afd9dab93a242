//! Equipment status interval engine.
//!
//! This crate turns operator-entered status changes into:
//! - Intervals: the dwell time each change opened
//! - Summaries: per-status counts, hours and percentage share
//! - Current status: time elapsed since the most recent change
//!
//! Everything here is a pure function of its inputs. Callers supply the
//! event snapshot and, for the current status, the instant to measure to.

mod aggregate;
mod current;
pub mod duration;
pub mod event;
mod interval;
mod reconstruct;
pub mod status;

pub use aggregate::{StatusAggregate, StatusSummary, aggregate, summarize};
pub use current::{CurrentStatus, current_status};
pub use duration::{format_minutes, parse_hours};
pub use event::{EventError, StatusEvent};
pub use interval::{Dwell, Interval};
pub use reconstruct::{
    MAX_PLAUSIBLE_GAP_MINUTES, MIN_POSITIVE_GAP_MINUTES, ReconstructConfig, chronological, latest,
    reconstruct_intervals,
};
pub use status::{Status, UnknownStatus};
