use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::format_hours_minutes;
use crate::storage::AppState;

/// Pomodoros per day shown as the progress target.
pub const DAILY_GOAL: u64 = 8;

/// Read-only view of the statistics as of a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub as_of: NaiveDate,
    pub total_pomodoros: u64,
    pub total_focus_secs: u64,
    pub today_pomodoros: u64,
    pub today_focus_secs: u64,
    pub weekly_pomodoros: u64,
    pub daily_goal: u64,
}

impl SummaryReport {
    /// 0.0 .. 1.0 progress towards the daily goal.
    pub fn goal_progress(&self) -> f64 {
        if self.daily_goal == 0 {
            return 1.0;
        }
        (self.today_pomodoros as f64 / self.daily_goal as f64).min(1.0)
    }
}

pub fn summarize(state: &AppState, as_of: NaiveDate) -> SummaryReport {
    let today = state.stats.bucket(as_of);
    SummaryReport {
        as_of,
        total_pomodoros: state.stats.total_pomodoros,
        total_focus_secs: state.stats.total_focus_secs,
        today_pomodoros: today.pomodoros,
        today_focus_secs: today.focus_secs,
        weekly_pomodoros: state.stats.weekly_pomodoros,
        daily_goal: DAILY_GOAL,
    }
}

impl std::fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "All-time:")?;
        writeln!(f, "  Total Pomodoros: {}", self.total_pomodoros)?;
        writeln!(f, "  Total Focus Time: {}", format_hours_minutes(self.total_focus_secs))?;
        writeln!(f)?;
        writeln!(f, "Today ({}):", self.as_of)?;
        writeln!(
            f,
            "  Pomodoros: {}/{} (Daily Goal)",
            self.today_pomodoros, self.daily_goal
        )?;
        writeln!(f, "  Focus Time: {}", format_hours_minutes(self.today_focus_secs))?;
        writeln!(f)?;
        writeln!(f, "This Week:")?;
        write!(f, "  Total Pomodoros: {}", self.weekly_pomodoros)
    }
}
