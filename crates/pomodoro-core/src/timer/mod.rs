mod clock;
mod engine;
mod host;
mod mode;

pub use clock::{Clock, LocalClock, ManualClock};
pub use engine::{SessionEngine, SessionState};
pub use host::TimerHost;
pub use mode::{advance_cycle, SessionMode};
