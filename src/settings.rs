//! Run settings
//!
//! Loaded from an optional JSON file by the host. Every field has a default,
//! so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TIME_OF_DAY, DEFAULT_WIND, WIND_MAX, WIND_MIN};
use crate::environment::wrap_time_of_day;

/// Simulation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for paddle-hit jitter
    pub seed: u64,
    /// Initial wind strength (0.0 - 3.0)
    pub wind_strength: f32,
    /// Initial time of day (0.0 - 1.0, 0.5 = noon)
    pub time_of_day: f32,
    /// Start with the simulation paused
    pub start_paused: bool,
    /// Track walkers jog instead of walk
    pub jogging_walkers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 12345,
            wind_strength: DEFAULT_WIND,
            time_of_day: DEFAULT_TIME_OF_DAY,
            start_paused: false,
            jogging_walkers: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping scalar ranges
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    fn sanitize(&mut self) {
        self.wind_strength = self.wind_strength.clamp(WIND_MIN, WIND_MAX);
        self.time_of_day = wrap_time_of_day(self.time_of_day);
    }
}
