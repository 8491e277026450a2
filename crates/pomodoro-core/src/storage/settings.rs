//! User settings stored in the `settings` object of the state document.
//!
//! Durations are whole minutes. Every field has a default, so a document
//! written by an older version with fewer keys still loads.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::SessionMode;

pub const FOCUS_MINUTES_RANGE: (u32, u32) = (1, 60);
pub const SHORT_BREAK_MINUTES_RANGE: (u32, u32) = (1, 30);
pub const LONG_BREAK_MINUTES_RANGE: (u32, u32) = (1, 60);
pub const SESSIONS_UNTIL_LONG_RANGE: (u32, u32) = (1, 10);
pub const VOLUME_RANGE: (f64, f64) = (0.0, 100.0);

/// Named background palettes. Unknown names resolve to [`Theme::CoffeeBreak`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    LavenderDreams,
    ForestMeditation,
    OceanBreeze,
    SkyDrift,
    #[default]
    CoffeeBreak,
    CherryBlossom,
    MintFresh,
    AuroraNight,
    MonochromeMinimal,
    NuyoFocusDark,
}

impl Theme {
    pub const ALL: [Theme; 10] = [
        Theme::LavenderDreams,
        Theme::ForestMeditation,
        Theme::OceanBreeze,
        Theme::SkyDrift,
        Theme::CoffeeBreak,
        Theme::CherryBlossom,
        Theme::MintFresh,
        Theme::AuroraNight,
        Theme::MonochromeMinimal,
        Theme::NuyoFocusDark,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::LavenderDreams => "Lavender Dreams",
            Theme::ForestMeditation => "Forest Meditation",
            Theme::OceanBreeze => "Ocean Breeze",
            Theme::SkyDrift => "Sky Drift",
            Theme::CoffeeBreak => "Coffee Break",
            Theme::CherryBlossom => "Cherry Blossom",
            Theme::MintFresh => "Mint Fresh",
            Theme::AuroraNight => "Aurora Night",
            Theme::MonochromeMinimal => "Monochrome Minimal",
            Theme::NuyoFocusDark => "Nuyo Focus Dark",
        }
    }

    /// Background color as RGBA in `0.0..=1.0`.
    pub fn rgba(self) -> [f32; 4] {
        match self {
            Theme::LavenderDreams => [0.8, 0.6, 1.0, 1.0],
            Theme::ForestMeditation => [0.5, 0.8, 0.5, 1.0],
            Theme::OceanBreeze => [0.5, 0.8, 1.0, 1.0],
            Theme::SkyDrift => [0.9, 0.9, 1.0, 1.0],
            Theme::CoffeeBreak => [0.96, 0.87, 0.7, 1.0],
            Theme::CherryBlossom => [1.0, 0.8, 0.9, 1.0],
            Theme::MintFresh => [0.7, 1.0, 0.8, 1.0],
            Theme::AuroraNight => [0.2, 0.2, 0.5, 1.0],
            Theme::MonochromeMinimal => [0.9, 0.9, 0.9, 1.0],
            Theme::NuyoFocusDark => [0.1, 0.1, 0.1, 1.0],
        }
    }

    /// Exact-name lookup. Returns `None` for names outside the palette.
    pub fn from_name(name: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl From<String> for Theme {
    fn from(name: String) -> Self {
        Theme::from_name(&name).unwrap_or_default()
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.name().to_string()
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ringtone {
    #[default]
    Enabled,
    Disabled,
}

/// Timer durations and preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "focus")]
    pub focus_minutes: u32,
    #[serde(rename = "short")]
    pub short_break_minutes: u32,
    #[serde(rename = "long")]
    pub long_break_minutes: u32,
    #[serde(rename = "sessions")]
    pub sessions_until_long: u32,
    pub theme: Theme,
    #[serde(rename = "auto_break")]
    pub auto_start_break: bool,
    #[serde(rename = "auto_focus")]
    pub auto_start_focus: bool,
    pub volume: f64,
    pub ringtone: Ringtone,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: 40,
            short_break_minutes: 5,
            long_break_minutes: 20,
            sessions_until_long: 4,
            theme: Theme::CoffeeBreak,
            auto_start_break: true,
            auto_start_focus: true,
            volume: 50.0,
            ringtone: Ringtone::Enabled,
        }
    }
}

impl Settings {
    /// Configured duration of `mode` in seconds.
    pub fn duration_secs(&self, mode: SessionMode) -> u64 {
        let minutes = match mode {
            SessionMode::Focus => self.focus_minutes,
            SessionMode::ShortBreak => self.short_break_minutes,
            SessionMode::LongBreak => self.long_break_minutes,
        };
        u64::from(minutes).saturating_mul(60)
    }

    pub fn ringtone_enabled(&self) -> bool {
        self.ringtone == Ringtone::Enabled
    }

    /// Whether the host should start `next` without user action.
    pub fn auto_starts(&self, next: SessionMode) -> bool {
        if next.is_break() {
            self.auto_start_break
        } else {
            self.auto_start_focus
        }
    }

    /// Reject values outside the ranges the settings UI offers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("focus", self.focus_minutes, FOCUS_MINUTES_RANGE)?;
        check_range("short", self.short_break_minutes, SHORT_BREAK_MINUTES_RANGE)?;
        check_range("long", self.long_break_minutes, LONG_BREAK_MINUTES_RANGE)?;
        check_range("sessions", self.sessions_until_long, SESSIONS_UNTIL_LONG_RANGE)?;

        let (min, max) = VOLUME_RANGE;
        if !self.volume.is_finite() || self.volume < min || self.volume > max {
            return Err(ValidationError::OutOfRange {
                field: "volume",
                value: self.volume,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Get a setting as a string by its persisted key (e.g. `"focus"`).
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a setting by its persisted key, parsing `value` according to the
    /// type of the existing field. The result is validated; on error `self`
    /// is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(key, e))?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ValidationError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ValidationError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                serde_json::Value::Bool(value.parse::<bool>().map_err(|e| invalid(key, e))?)
            }
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else {
                    value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(key, format!("cannot parse '{value}' as number")))?
                }
            }
            _ if key == "theme" => {
                let theme = Theme::from_name(value)
                    .ok_or_else(|| invalid(key, format!("unknown theme '{value}'")))?;
                serde_json::Value::String(theme.name().to_string())
            }
            _ => serde_json::Value::String(value.to_string()),
        };
        obj.insert(key.to_string(), new_value);

        let updated: Settings = serde_json::from_value(json).map_err(|e| invalid(key, e))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn check_range(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(max),
        });
    }
    Ok(())
}

fn invalid(field: &str, message: impl std::fmt::Display) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
