//! Live readout of the still-open interval.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::duration::format_minutes;
use crate::event::StatusEvent;
use crate::reconstruct::latest;

/// The most recent event and how long ago it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentStatus {
    pub event: StatusEvent,
    /// Whole minutes since the event, clamped at zero.
    pub elapsed_minutes: u32,
}

impl CurrentStatus {
    /// Elapsed time from `event` to `now`. A `now` earlier than the event
    /// (clock skew) yields zero.
    pub fn since(event: &StatusEvent, now: NaiveDateTime) -> Self {
        let elapsed = (now - event.instant()).num_minutes().max(0);
        Self {
            event: event.clone(),
            elapsed_minutes: u32::try_from(elapsed).unwrap_or(u32::MAX),
        }
    }

    pub const fn hours(&self) -> u32 {
        self.elapsed_minutes / 60
    }

    pub const fn minutes(&self) -> u32 {
        self.elapsed_minutes % 60
    }

    pub fn elapsed_label(&self) -> String {
        format_minutes(self.elapsed_minutes)
    }
}

/// Resolves the current status of a snapshot at `now`.
///
/// Returns `None` when there are no events; that is distinct from a zero
/// elapsed time.
pub fn current_status(events: &[StatusEvent], now: NaiveDateTime) -> Option<CurrentStatus> {
    latest(events).map(|event| CurrentStatus::since(event, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    fn event(date: &str, time: &str, status: &str) -> StatusEvent {
        StatusEvent::parse(date, time, status).expect("valid test event")
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        event(date, time, "running").instant()
    }

    #[test]
    fn no_events_means_no_current_record() {
        assert_eq!(current_status(&[], at("2025-07-03", "10:00")), None);
    }

    #[test]
    fn resolves_against_most_recent_event() {
        let events = vec![
            event("2025-07-02", "16:00", "maintenance"),
            event("2025-07-03", "08:00", "running"),
            event("2025-07-02", "18:30", "running"),
        ];
        let current = current_status(&events, at("2025-07-03", "10:45")).unwrap();

        assert_eq!(current.event.status, Status::Running);
        assert_eq!(current.event.instant(), at("2025-07-03", "08:00"));
        assert_eq!(current.elapsed_minutes, 165);
        assert_eq!(current.hours(), 2);
        assert_eq!(current.minutes(), 45);
        assert_eq!(current.elapsed_label(), "2h 45m");
    }

    #[test]
    fn single_event_resolves() {
        let events = vec![event("2025-07-02", "08:00", "maintenance")];
        let current = current_status(&events, at("2025-07-02", "08:00")).unwrap();
        assert_eq!(current.elapsed_minutes, 0);
        assert_eq!(current.event.status, Status::Maintenance);
    }

    #[test]
    fn clock_skew_clamps_to_zero() {
        let events = vec![event("2025-07-03", "08:00", "running")];
        let current = current_status(&events, at("2025-07-03", "07:00")).unwrap();
        assert_eq!(current.elapsed_minutes, 0);
    }

    #[test]
    fn open_interval_is_not_capped() {
        let events = vec![event("2025-07-01", "08:00", "running")];
        let current = current_status(&events, at("2025-07-03", "09:30")).unwrap();
        assert_eq!(current.elapsed_minutes, 2 * 1440 + 90);
        assert_eq!(current.elapsed_label(), "49h 30m");
    }
}
