//! The persisted state document.
//!
//! Field names follow the on-disk JSON keys (`total_pomos`, `last_date`, ...).
//! Every level carries `#[serde(default)]` so documents with missing keys
//! load with defaults filled in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::settings::Settings;

/// Per-day totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyBucket {
    #[serde(rename = "pomos")]
    pub pomodoros: u64,
    #[serde(rename = "time")]
    pub focus_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    #[serde(rename = "total_pomos")]
    pub total_pomodoros: u64,
    #[serde(rename = "total_time")]
    pub total_focus_secs: u64,
    /// Keyed by calendar date; iteration order is chronological.
    #[serde(rename = "daily")]
    pub daily_buckets: BTreeMap<NaiveDate, DailyBucket>,
    #[serde(rename = "weekly", deserialize_with = "lenient_count")]
    pub weekly_pomodoros: u64,
}

impl Statistics {
    pub fn bucket(&self, date: NaiveDate) -> DailyBucket {
        self.daily_buckets.get(&date).copied().unwrap_or_default()
    }

    /// Sum of pomodoros over every stored bucket.
    pub fn bucketed_pomodoros(&self) -> u64 {
        self.daily_buckets.values().map(|b| b.pomodoros).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub settings: Settings,
    pub stats: Statistics,
    #[serde(rename = "user")]
    pub user_identifier: Option<String>,
    #[serde(rename = "last_date")]
    pub last_active_date: Option<NaiveDate>,
    pub current_cycle: u32,
}

/// Older documents stored `"weekly": {}`; anything that isn't a
/// non-negative integer reads as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or(0))
}
