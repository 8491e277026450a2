//! Calendar source for the engine.
//!
//! Day and week rollovers depend on the local calendar date, so the engine
//! takes it from a [`Clock`] instead of calling `Local::now()` directly.

use std::sync::{Arc, Mutex};

use chrono::{Days, Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// The system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable clock. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Arc::new(Mutex::new(date)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(|p| p.into_inner()) = date;
    }

    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.lock().unwrap_or_else(|p| p.into_inner());
        *date = date.checked_add_days(Days::new(days)).unwrap_or(*date);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(|p| p.into_inner())
    }
}
