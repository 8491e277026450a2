//! Statistics module
//!
//! Booking of completed sessions into the persisted counters, and the
//! read-only summary shown to the user.

mod daily;
mod summary;

pub use daily::{record_completion, DayRollover, WEEKLY_WINDOW};
pub use summary::{summarize, SummaryReport, DAILY_GOAL};
