//! Shared primitive types used across the digital twin.

/// Offset from today, in days. Day 0 is "Now".
pub type DayOffset = u32;

/// The canonical what-if session identifier.
pub type SessionId = String;

/// Day offsets every projection is evaluated at.
pub const PROJECTION_DAYS: [DayOffset; 4] = [0, 30, 60, 90];

/// Number of points in every projected series.
pub const PROJECTION_POINTS: usize = PROJECTION_DAYS.len();

/// Display label for a day offset: "Now" for day 0, "+30d" otherwise.
pub fn day_label(day: DayOffset) -> String {
    if day == 0 {
        "Now".to_string()
    } else {
        format!("+{day}d")
    }
}
