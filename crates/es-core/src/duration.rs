//! Duration codec.
//!
//! Dwell times are displayed as `"4h"`, `"2h 30m"` or `"45m"`, and the
//! aggregator reads hours back out of that same display form. Both
//! directions live here so the rounding behaviour is one contract.

use std::sync::LazyLock;

use regex::Regex;

/// Hour component: digits followed by an hour marker.
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:小时|h)").expect("valid hours pattern"));

/// Minute component: digits followed by a minute marker.
static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:分钟|分|m)").expect("valid minutes pattern"));

/// Formats whole minutes as `"{m}m"`, `"{h}h"` or `"{h}h {m}m"`.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours == 0 {
        format!("{rest}m")
    } else if rest == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {rest}m")
    }
}

/// Parses a formatted duration back into fractional hours.
///
/// Missing components count as zero, so a string with neither marker
/// parses to `0.0`. Never fails.
pub fn parse_hours(s: &str) -> f64 {
    let hours = capture_number(&HOURS_RE, s);
    let minutes = capture_number(&MINUTES_RE, s);
    hours + minutes / 60.0
}

fn capture_number(re: &Regex, s: &str) -> f64 {
    re.captures(s)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}
