use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionMode;

/// Result of a finished session, handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub completed_mode: SessionMode,
    pub reward_message: String,
    pub next_mode: SessionMode,
    pub next_duration_secs: u64,
    /// Cycle counter after the transition.
    pub current_cycle: u32,
    /// Calendar date the completion was booked under.
    pub completed_on: NaiveDate,
}

/// Every state change of the session engine produces an Event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        mode: SessionMode,
        duration_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        mode: SessionMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        mode: SessionMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionReset {
        mode: SessionMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed without finishing the session.
    Progress {
        mode: SessionMode,
        remaining_secs: u64,
        total_secs: u64,
    },
    SessionCompleted(CompletionEvent),
}

impl Event {
    pub fn completion(&self) -> Option<&CompletionEvent> {
        match self {
            Event::SessionCompleted(done) => Some(done),
            _ => None,
        }
    }
}
