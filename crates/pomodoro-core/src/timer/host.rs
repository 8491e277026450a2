//! Host-side driver around [`SessionEngine`].
//!
//! The engine only transitions between modes. Deciding whether the next
//! session starts by itself, and alerting the user, happens here.

use tracing::{debug, warn};

use super::engine::SessionEngine;
use crate::error::StoreError;
use crate::events::Event;
use crate::notify::{NoopNotifier, Notifier};

pub struct TimerHost<N: Notifier = NoopNotifier> {
    engine: SessionEngine,
    notifier: N,
}

impl TimerHost<NoopNotifier> {
    pub fn without_notifications(engine: SessionEngine) -> Self {
        Self::new(engine, NoopNotifier)
    }
}

impl<N: Notifier> TimerHost<N> {
    pub fn new(engine: SessionEngine, notifier: N) -> Self {
        Self { engine, notifier }
    }

    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SessionEngine {
        &mut self.engine
    }

    /// Tick the engine once. On completion, alert the user and start the
    /// next session if the matching auto-start setting is on.
    ///
    /// A completion is already booked when it is returned, so a failed
    /// auto-start only leaves the next session idle.
    pub fn on_tick(&mut self) -> Result<Option<Event>, StoreError> {
        let event = self.engine.tick()?;
        if let Some(done) = event.as_ref().and_then(Event::completion) {
            self.notifier.session_completed(done, self.engine.settings());
            if self.engine.settings().auto_starts(done.next_mode) {
                debug!(next = ?done.next_mode, "auto-starting next session");
                if let Err(e) = self.engine.start() {
                    warn!(next = ?done.next_mode, error = %e, "auto-start failed; next session left idle");
                }
            }
        }
        Ok(event)
    }
}
