//! Simulation settings
//!
//! Read from a JSON file; anything missing takes its default value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::CollisionMode;

/// Simulation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for placement
    pub seed: u64,

    // === Circles ===
    /// Initial circle count
    pub circle_count: u32,
    /// Lower limit for the - key
    pub circle_min: u32,
    /// Upper limit for the + key
    pub circle_max: u32,

    // === Physics ===
    /// How circle-circle contacts are resolved each frame
    pub collision_mode: CollisionMode,
    /// Wall clock seconds -> simulated time
    pub time_scale: f64,

    // === Viewport ===
    /// Initial viewport in pixels (width, height)
    pub viewport: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            circle_count: DEFAULT_CIRCLE_COUNT,
            circle_min: CIRCLE_MIN,
            circle_max: CIRCLE_MAX,

            collision_mode: CollisionMode::PerCircle,
            time_scale: TIME_SCALE,

            viewport: (1280, 720),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values into something the simulation can run
    pub fn sanitized(mut self) -> Self {
        if self.circle_min > self.circle_max {
            log::warn!(
                "circle_min {} > circle_max {}, swapping",
                self.circle_min,
                self.circle_max
            );
            std::mem::swap(&mut self.circle_min, &mut self.circle_max);
        }

        let count = self.circle_count.clamp(self.circle_min, self.circle_max);
        if count != self.circle_count {
            log::warn!("circle_count {} clamped to {}", self.circle_count, count);
            self.circle_count = count;
        }

        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            log::warn!("time_scale {} invalid, using {}", self.time_scale, TIME_SCALE);
            self.time_scale = TIME_SCALE;
        }

        self
    }
}
