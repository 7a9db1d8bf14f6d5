//! Clock Window
//!
//! Stateless fixed-window arithmetic. All instants come from the tokio
//! clock so tests can pause and advance time.

use std::time::Duration;
use tokio::time::Instant;

/// Instant at which a window opened at `start` closes
#[inline]
pub fn window_end(start: Instant, window: Duration) -> Instant {
    start + window
}

/// A window is expired once a full `window` has elapsed since `start`
#[inline]
pub fn is_expired(start: Instant, window: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= window
}

/// Time left before the window closes (zero once expired)
#[inline]
pub fn remaining(start: Instant, window: Duration, now: Instant) -> Duration {
    window_end(start, window).saturating_duration_since(now)
}

/// Render a duration the way it appears in rate limit messages
///
/// `1s`, `250ms`, `500µs`, `1.5ms`, `1m30s`, `2h0m5s`. Sub-second values
/// use the largest unit that keeps the integer part non-zero.
pub fn humanize(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    if total_secs == 0 {
        let nanos = duration.subsec_nanos();
        return match nanos {
            0 => "0s".to_string(),
            1..=999 => format!("{nanos}ns"),
            1_000..=999_999 => with_fraction(nanos / 1_000, nanos % 1_000, 3, "µs"),
            _ => with_fraction(nanos / 1_000_000, nanos % 1_000_000, 6, "ms"),
        };
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let secs_part = with_fraction(secs as u32, duration.subsec_nanos(), 9, "s");

    match (hours, minutes) {
        (0, 0) => secs_part,
        (0, m) => format!("{}m{}", m, secs_part),
        (h, m) => format!("{}h{}m{}", h, m, secs_part),
    }
}

/// `whole.fraction<unit>` with trailing zeros of the fraction dropped
fn with_fraction(whole: u32, fraction: u32, digits: usize, unit: &str) -> String {
    if fraction == 0 {
        return format!("{whole}{unit}");
    }
    let fraction = format!("{fraction:0digits$}");
    format!("{whole}.{}{unit}", fraction.trim_end_matches('0'))
}
