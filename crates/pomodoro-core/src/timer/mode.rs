use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionMode {
    pub fn is_break(self) -> bool {
        matches!(self, SessionMode::ShortBreak | SessionMode::LongBreak)
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionMode::Focus => "Focus Time",
            SessionMode::ShortBreak => "Short Break",
            SessionMode::LongBreak => "Long Break",
        }
    }

    /// Message shown when a session of this mode finishes.
    pub fn reward_message(self) -> &'static str {
        if self.is_break() {
            "Great break! Ready to focus again."
        } else {
            "Amazing! You earned a reward: 🌟 Focus Star!"
        }
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Apply the cycle rule for a completed session and return the next mode.
///
/// Completing focus bumps `current_cycle`; every `sessions_until_long`-th
/// focus session earns a long break. Only a completed long break resets the
/// counter.
pub fn advance_cycle(completed: SessionMode, current_cycle: &mut u32, sessions_until_long: u32) -> SessionMode {
    match completed {
        SessionMode::Focus => {
            *current_cycle = current_cycle.saturating_add(1);
            if *current_cycle % sessions_until_long.max(1) == 0 {
                SessionMode::LongBreak
            } else {
                SessionMode::ShortBreak
            }
        }
        SessionMode::ShortBreak => SessionMode::Focus,
        SessionMode::LongBreak => {
            *current_cycle = 0;
            SessionMode::Focus
        }
    }
}
