//! Wall-clock time arithmetic.
//!
//! Slots carry their times as 24-hour `HH:mm` strings (no dates, no
//! timezones). Everything that needs to compare or order times goes through
//! minutes-since-midnight, and everything that renders times back to the user
//! goes through [`minutes_to_label`].

use regex::Regex;
use std::sync::LazyLock;

/// Strict 24-hour time: `00:00`..=`23:59`, zero-padded.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid time regex"));

/// Rendered when a duration cannot be computed from its endpoints.
pub const INVALID_DURATION_LABEL: &str = "--";

/// Parses an `HH:mm` string into minutes since midnight.
///
/// Returns `None` for anything that is not a strictly formatted 24-hour
/// time, including empty strings, `9:00` (missing zero-pad) and `24:00`.
pub fn parse_to_minutes(value: &str) -> Option<u32> {
    let caps = TIME_RE.captures(value)?;
    // The regex guarantees both groups are two-digit numbers in range.
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight as a zero-padded `HH:mm` label.
///
/// Out-of-range input is clamped into `[0, 1440]`.
pub fn minutes_to_label(minutes: i64) -> String {
    let clamped = minutes.clamp(0, 1440);
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}

/// Human-readable duration between two `HH:mm` strings, e.g. `"1h 30m"` or
/// `"45m"`. Returns [`INVALID_DURATION_LABEL`] when either endpoint is
/// unparsable or the interval is not positive.
pub fn duration_label(start: &str, end: &str) -> String {
    let (Some(start), Some(end)) = (parse_to_minutes(start), parse_to_minutes(end)) else {
        return INVALID_DURATION_LABEL.to_string();
    };
    if end <= start {
        return INVALID_DURATION_LABEL.to_string();
    }

    let total = end - start;
    let hours = total / 60;
    let minutes = total % 60;
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Half-open interval overlap: touching endpoints do not overlap, so a slot
/// ending at 10:00 coexists with one starting at 10:00.
pub fn intervals_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}
