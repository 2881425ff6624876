//! Read models derived for the home screen.
//!
//! Pure functions over store contents; nothing here touches storage.

use crate::model::activity::Activity;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Snapshot of everything the home screen shows about stored data.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub notes: usize,
    /// Completion ratio in `[0, 1]`.
    pub progress: f64,
    /// Newest first.
    pub recent_activities: Vec<Activity>,
}

/// Completed-over-total ratio; `0.0` when there are no tasks.
pub fn progress(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (completed.min(total) as f64) / (total as f64)
}

/// `progress` as a truncated integer percentage.
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    (progress(completed, total) * 100.0) as u32
}

/// Greeting for a local hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        17..=21 => "Good Evening",
        _ => "Good Night",
    }
}

/// Relative label for `then` as seen at `now` (both epoch ms).
pub fn time_ago(now: i64, then: i64) -> String {
    let elapsed = now.saturating_sub(then).max(0);
    let hours = elapsed / HOUR_MS;
    let minutes = elapsed / MINUTE_MS;
    if hours > 0 {
        let unit = if hours == 1 { "hour" } else { "hours" };
        format!("{hours} {unit} ago")
    } else if minutes > 0 {
        format!("{minutes} min ago")
    } else {
        "Just now".to_string()
    }
}
