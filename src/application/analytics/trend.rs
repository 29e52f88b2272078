use crate::application::analytics::time_window::TimeWindows;
use crate::domain::ports::ticket_store::TimeRange;
use chrono::{DateTime, Utc};

pub const TREND_WINDOW_DAYS: i64 = 7;

/// Two equal-length windows that meet at `current.from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindows {
    pub current: TimeRange,
    pub previous: TimeRange,
}

impl TrendWindows {
    /// The trailing `days` up to `now`, and the `days` before that.
    pub fn trailing(windows: &TimeWindows, now: DateTime<Utc>, days: i64) -> Self {
        let boundary = windows.add_days(now, -days);
        let previous_from = windows.add_days(now, -2 * days);
        Self {
            current: TimeRange::between(boundary, now),
            previous: TimeRange::between(previous_from, boundary),
        }
    }
}

/// Relative change from `previous` to `current`, in percent.
/// `None` when there is no baseline to compare against.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let pct = (current - previous) / previous * 100.0;
    pct.is_finite().then_some(pct)
}

pub fn count_change(current: i64, previous: i64) -> Option<f64> {
    percent_change(current as f64, previous as f64)
}

/// Averages only compare when both windows have data.
pub fn average_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(current), Some(previous)) => percent_change(current, previous),
        _ => None,
    }
}
