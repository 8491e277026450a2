//! Booking completed sessions into the all-time, daily and weekly counters.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::storage::{AppState, DailyBucket};
use crate::timer::SessionMode;

/// Number of most recent buckets summed into the weekly figure.
pub const WEEKLY_WINDOW: usize = 7;

/// What happens to the daily buckets on the first completion of a new day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DayRollover {
    /// Drop all earlier buckets and start over with today's.
    #[default]
    Replace,
    /// Keep earlier buckets, pruning the oldest beyond `max_days`.
    Retain { max_days: Option<usize> },
}

/// Update `state.stats` and `state.last_active_date` for one completed
/// session. Returns `true` if this was the first completion on `today`.
///
/// Only focus sessions count towards pomodoros and focus time; a break
/// completed on a new day still opens an (empty) bucket for it.
pub fn record_completion(
    state: &mut AppState,
    completed: SessionMode,
    duration_secs: u64,
    today: NaiveDate,
    rollover: DayRollover,
) -> bool {
    let is_focus = completed == SessionMode::Focus;
    let booked = DailyBucket {
        pomodoros: u64::from(is_focus),
        focus_secs: if is_focus { duration_secs } else { 0 },
    };

    let stats = &mut state.stats;
    if is_focus {
        stats.total_pomodoros = stats.total_pomodoros.saturating_add(1);
        stats.total_focus_secs = stats.total_focus_secs.saturating_add(duration_secs);
    }

    let new_day = state.last_active_date != Some(today);
    if new_day {
        match rollover {
            DayRollover::Replace => {
                stats.daily_buckets.clear();
                stats.daily_buckets.insert(today, booked);
            }
            DayRollover::Retain { max_days } => {
                accumulate(stats.daily_buckets.entry(today).or_default(), booked);
                if let Some(max_days) = max_days {
                    while stats.daily_buckets.len() > max_days.max(1) {
                        stats.daily_buckets.pop_first();
                    }
                }
            }
        }
        state.last_active_date = Some(today);
        if today.weekday() == Weekday::Mon {
            stats.weekly_pomodoros = 0;
        }
    } else {
        accumulate(stats.daily_buckets.entry(today).or_default(), booked);
    }

    stats.weekly_pomodoros = if stats.daily_buckets.len() >= WEEKLY_WINDOW {
        stats
            .daily_buckets
            .values()
            .rev()
            .take(WEEKLY_WINDOW)
            .map(|b| b.pomodoros)
            .sum()
    } else {
        0
    };

    new_day
}

fn accumulate(bucket: &mut DailyBucket, booked: DailyBucket) {
    bucket.pomodoros = bucket.pomodoros.saturating_add(booked.pomodoros);
    bucket.focus_secs = bucket.focus_secs.saturating_add(booked.focus_secs);
}
