use tracing::info;

use crate::events::CompletionEvent;
use crate::storage::Settings;

/// Alert delivery for finished sessions (sound, desktop notification,
/// vibration). Called by the host after a completion has been persisted,
/// never from inside the engine.
pub trait Notifier {
    /// Called when any session completes.
    fn session_completed(&self, _event: &CompletionEvent, _settings: &Settings) {
        // default no-op
    }
}

/// For platforms without any alert capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {}

/// Writes completions to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn session_completed(&self, event: &CompletionEvent, settings: &Settings) {
        info!(
            title = %format!("{} Complete", event.completed_mode),
            message = %event.reward_message,
            ring = settings.ringtone_enabled(),
            volume = settings.volume,
            "session complete"
        );
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn session_completed(&self, event: &CompletionEvent, settings: &Settings) {
        (**self).session_completed(event, settings)
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn session_completed(&self, event: &CompletionEvent, settings: &Settings) {
        (**self).session_completed(event, settings)
    }
}
