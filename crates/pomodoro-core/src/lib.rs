//! # Pomodoro Core Library
//!
//! Session state machine and statistics engine for a single-user Pomodoro
//! timer. Rendering, notifications and identity are left to the host; this
//! crate decides what happens when a session ends and keeps the numbers.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine over Focus / Short Break /
//!   Long Break. The host calls `tick()` once per second.
//! - **Storage**: a single JSON document holding settings, statistics and
//!   the cycle counter, written atomically. Every mutation is a
//!   load → mutate → save transaction under the store lock.
//! - **Stats**: booking of completed sessions into daily and weekly counters,
//!   and a read-only summary.
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: countdown and mode transitions
//! - [`TimerHost`]: auto-start policy and notification around the engine
//! - [`Store`]: state document persistence, backup and restore
//! - [`summarize`]: statistics report for a given date

pub mod error;
pub mod events;
pub mod format;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{CoreError, StoreError, ValidationError};
pub use events::{CompletionEvent, Event};
pub use notify::{LogNotifier, NoopNotifier, Notifier};
pub use stats::{summarize, DayRollover, SummaryReport, DAILY_GOAL};
pub use storage::{AppState, DailyBucket, Recovery, Ringtone, Settings, Statistics, Store, Theme};
pub use timer::{Clock, LocalClock, ManualClock, SessionEngine, SessionMode, SessionState, TimerHost};
