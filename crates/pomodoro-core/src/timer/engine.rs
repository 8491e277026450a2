//! Session engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads - the host calls `tick()` once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Focus -> ShortBreak -> Focus -> ... -> Focus -> LongBreak -> Focus
//! ```
//!
//! Within a mode the countdown moves `Idle -> Running <-> Paused -> Idle`.
//! When the countdown reaches zero the session is booked into the store and
//! the engine moves to the next mode, idle.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(store)?;
//! engine.start()?;
//! // Once per second:
//! if let Some(Event::SessionCompleted(done)) = engine.tick()? { ... }
//! ```

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{Clock, LocalClock};
use super::mode::{advance_cycle, SessionMode};
use crate::error::StoreError;
use crate::events::{CompletionEvent, Event};
use crate::stats::{record_completion, DayRollover};
use crate::storage::{Settings, Store};

/// Transient countdown state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: SessionMode,
    pub remaining_secs: u64,
    /// Duration of the current mode, fixed when the mode was entered.
    pub configured_duration_secs: u64,
    pub is_running: bool,
    pub is_paused: bool,
    /// Completed focus sessions since the last long break.
    pub cycle_count: u32,
}

impl SessionState {
    fn idle(mode: SessionMode, duration_secs: u64, cycle_count: u32) -> Self {
        Self {
            mode,
            remaining_secs: duration_secs,
            configured_duration_secs: duration_secs,
            is_running: false,
            is_paused: false,
            cycle_count,
        }
    }

    /// Countdown untouched since the mode was entered or reset.
    pub fn is_fresh(&self) -> bool {
        !self.is_running && self.remaining_secs == self.configured_duration_secs
    }
}

/// Core session engine.
pub struct SessionEngine {
    store: Arc<Store>,
    clock: Box<dyn Clock>,
    rollover: DayRollover,
    /// Settings as of the last read from the store.
    settings: Settings,
    state: SessionState,
}

impl SessionEngine {
    /// Create an engine in fresh Focus mode using the local calendar.
    pub fn new(store: Arc<Store>) -> Result<Self, StoreError> {
        Self::with_clock(store, LocalClock)
    }

    pub fn with_clock(store: Arc<Store>, clock: impl Clock + 'static) -> Result<Self, StoreError> {
        let doc = store.load()?;
        let duration = doc.settings.duration_secs(SessionMode::Focus);
        Ok(Self {
            store,
            clock: Box::new(clock),
            rollover: DayRollover::default(),
            state: SessionState::idle(SessionMode::Focus, duration, doc.current_cycle),
            settings: doc.settings,
        })
    }

    /// Choose how daily buckets roll over to a new day.
    pub fn with_rollover(mut self, rollover: DayRollover) -> Self {
        self.rollover = rollover;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> SessionMode {
        self.state.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn auto_start_break(&self) -> bool {
        self.settings.auto_start_break
    }

    pub fn auto_start_focus(&self) -> bool {
        self.settings.auto_start_focus
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.state.configured_duration_secs;
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.state.remaining_secs as f64 / total as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down. A fresh countdown re-reads settings first so
    /// changes saved since the mode was entered take effect. Returns `None`
    /// if already running.
    pub fn start(&mut self) -> Result<Option<Event>, StoreError> {
        if self.state.is_running {
            return Ok(None);
        }
        if self.state.is_fresh() {
            let doc = self.store.load()?;
            let duration = doc.settings.duration_secs(self.state.mode);
            self.state = SessionState::idle(self.state.mode, duration, doc.current_cycle);
            self.settings = doc.settings;
        }
        self.state.is_running = true;
        self.state.is_paused = false;
        debug!(mode = ?self.state.mode, remaining = self.state.remaining_secs, "session started");
        Ok(Some(Event::SessionStarted {
            mode: self.state.mode,
            duration_secs: self.state.configured_duration_secs,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running || self.state.is_paused {
            return None;
        }
        self.state.is_paused = true;
        Some(Event::SessionPaused {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if !self.state.is_running || !self.state.is_paused {
            return None;
        }
        self.state.is_paused = false;
        Some(Event::SessionResumed {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Single play/pause control: start when stopped, otherwise flip pause.
    pub fn toggle(&mut self) -> Result<Option<Event>, StoreError> {
        if !self.state.is_running {
            self.start()
        } else if self.state.is_paused {
            Ok(self.resume())
        } else {
            Ok(self.pause())
        }
    }

    /// Stop and rewind the countdown. Mode and statistics are unchanged.
    pub fn reset(&mut self) -> Event {
        self.state.is_running = false;
        self.state.is_paused = false;
        self.state.remaining_secs = self.state.configured_duration_secs;
        Event::SessionReset {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Advance one second. Returns `None` while stopped or paused.
    ///
    /// # Errors
    /// A store failure while booking a finished session. The countdown is
    /// left stopped at zero; calling `start()` and ticking again retries.
    pub fn tick(&mut self) -> Result<Option<Event>, StoreError> {
        if !self.state.is_running || self.state.is_paused {
            return Ok(None);
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            return Ok(Some(Event::Progress {
                mode: self.state.mode,
                remaining_secs: self.state.remaining_secs,
                total_secs: self.state.configured_duration_secs,
            }));
        }
        match self.complete_session() {
            Ok(done) => Ok(Some(Event::SessionCompleted(done))),
            Err(e) => {
                self.state.is_running = false;
                self.state.is_paused = false;
                Err(e)
            }
        }
    }

    /// Book the current session and move to the next mode.
    ///
    /// Called by `tick()` when the countdown expires. The whole update is a
    /// single store transaction; on error nothing is persisted and the
    /// engine stays in the current mode.
    pub fn complete_session(&mut self) -> Result<CompletionEvent, StoreError> {
        let completed = self.state.mode;
        let duration = self.state.configured_duration_secs;
        let today = self.clock.today();
        let rollover = self.rollover;

        let (next_mode, current_cycle, settings, new_day) = self.store.transact(|doc| {
            let new_day = record_completion(doc, completed, duration, today, rollover);
            let next = advance_cycle(completed, &mut doc.current_cycle, doc.settings.sessions_until_long);
            (next, doc.current_cycle, doc.settings.clone(), new_day)
        })?;

        let next_duration_secs = settings.duration_secs(next_mode);
        info!(
            completed = ?completed,
            next = ?next_mode,
            cycle = current_cycle,
            new_day,
            "session completed"
        );

        self.state = SessionState::idle(next_mode, next_duration_secs, current_cycle);
        self.settings = settings;

        Ok(CompletionEvent {
            completed_mode: completed,
            reward_message: completed.reward_message().to_string(),
            next_mode,
            next_duration_secs,
            current_cycle,
            completed_on: today,
        })
    }
}

impl std::fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("store", &self.store.path())
            .field("rollover", &self.rollover)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
