//! Time of day and wind
//!
//! Cosmetic scalars the host adjusts at runtime. They never feed back into
//! the rally; renderers read them to light the scene and sway foliage.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Lighting regime for a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingPhase {
    /// Sun off, court floodlights on
    Night,
    /// Low warm sun
    DawnDusk,
    Day,
}

impl LightingPhase {
    pub fn from_time_of_day(t: f32) -> Self {
        if !(NIGHT_END..=NIGHT_START).contains(&t) {
            LightingPhase::Night
        } else if !(DAWN_END..=DUSK_START).contains(&t) {
            LightingPhase::DawnDusk
        } else {
            LightingPhase::Day
        }
    }

    pub fn floodlights_on(self) -> bool {
        self == LightingPhase::Night
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// 0 = midnight, 0.5 = noon, 1 = midnight again
    pub time_of_day: f32,
    pub wind_strength: f32,
    /// Phase accumulator for foliage sway
    pub wind_time: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_OF_DAY, DEFAULT_WIND)
    }
}

impl Environment {
    /// Out-of-range inputs are wrapped (time) or clamped (wind)
    pub fn new(time_of_day: f32, wind_strength: f32) -> Self {
        Self {
            time_of_day: wrap_time_of_day(time_of_day),
            wind_strength: wind_strength.clamp(WIND_MIN, WIND_MAX),
            wind_time: 0.0,
        }
    }

    pub fn advance_time(&mut self) {
        self.time_of_day += TIME_OF_DAY_STEP;
        if self.time_of_day > 1.0 {
            self.time_of_day = 0.0;
        }
    }

    pub fn retreat_time(&mut self) {
        self.time_of_day -= TIME_OF_DAY_STEP;
        if self.time_of_day < 0.0 {
            self.time_of_day = 1.0;
        }
    }

    pub fn wind_up(&mut self) {
        self.wind_strength = (self.wind_strength + WIND_STEP).min(WIND_MAX);
    }

    pub fn wind_down(&mut self) {
        self.wind_strength = (self.wind_strength - WIND_STEP).max(WIND_MIN);
    }

    /// Advance the sway phase by one tick
    pub fn tick(&mut self) {
        self.wind_time += WIND_CLOCK_RATE * self.wind_strength;
    }

    pub fn lighting_phase(&self) -> LightingPhase {
        LightingPhase::from_time_of_day(self.time_of_day)
    }

    /// Sun on a circle of radius `SUN_DISTANCE` in the x/y plane
    pub fn sun_position(&self) -> Vec3 {
        let angle = self.time_of_day * std::f32::consts::TAU;
        Vec3::new(SUN_DISTANCE * angle.cos(), SUN_DISTANCE * angle.sin(), 0.0)
    }

    /// Park lamps glow from late evening to early morning
    pub fn lamps_lit(&self) -> bool {
        self.time_of_day < LAMPS_OFF || self.time_of_day > LAMPS_ON
    }

    /// Tree sway angle (degrees) at ground position (x, z)
    pub fn tree_sway(&self, x: f32, z: f32) -> f32 {
        (self.wind_time + x * TREE_SWAY_X + z * TREE_SWAY_Z).sin() * self.wind_strength * TREE_SWAY_DEG
    }

    /// Bush sway angle (degrees) at ground position x
    pub fn bush_sway(&self, x: f32) -> f32 {
        (self.wind_time + x * BUSH_SWAY_X).sin() * self.wind_strength * BUSH_SWAY_DEG
    }
}

/// Fold a time of day into 0..=1
pub(crate) fn wrap_time_of_day(t: f32) -> f32 {
    if (0.0..=1.0).contains(&t) {
        t
    } else {
        t.rem_euclid(1.0)
    }
}
