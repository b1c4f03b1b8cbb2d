//! Moving Circles - bouncing discs with elastic collisions
//!
//! Core modules:
//! - `sim`: Circle placement, per-frame stepping, frame driver
//! - `renderer`: Per-instance data handed to an external renderer
//! - `settings`: JSON configuration with safe defaults

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Circle, CollisionMode, FrameInput, Simulation, tick};

use serde::{Deserialize, Serialize};

/// Simulation configuration constants
pub mod consts {
    /// Velocity multiplier, applied at creation AND again every frame
    pub const VELOCITY_SCALE: f32 = 2.5;

    /// Placement gives up after this many candidate circles
    pub const PLACEMENT_ATTEMPTS: u32 = 1024;

    /// Range of the per-circle radius draw before count scaling
    pub const RADIUS_MIN_FACTOR: f32 = 0.05;
    pub const RADIUS_MAX_FACTOR: f32 = 0.2;
    /// Radius = factor * RADIUS_COUNT_SCALE / sqrt(count)
    pub const RADIUS_COUNT_SCALE: f32 = 4.0;
    /// Floor for radii of very large batches
    pub const MIN_RADIUS: f32 = 1e-4;

    /// Circle count limits for +/- input
    pub const CIRCLE_MIN: u32 = 16;
    pub const CIRCLE_MAX: u32 = 32;
    pub const DEFAULT_CIRCLE_COUNT: u32 = 16;

    /// Wall clock seconds -> simulated time
    pub const TIME_SCALE: f64 = 0.4;

    /// Headless driver frame rate
    pub const FRAME_DT: f64 = 1.0 / 60.0;
}

/// Half extents of the simulation area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Bounds {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Bounds for a viewport aspect ratio (width / height).
    ///
    /// The shorter side always spans [-1, 1].
    pub fn from_aspect(aspect: f32) -> Self {
        if aspect >= 1.0 {
            Self::new(aspect, 1.0)
        } else {
            Self::new(1.0, 1.0 / aspect)
        }
    }

    /// Bounds for a viewport in pixels. Degenerate sizes fall back to square.
    pub fn from_viewport(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::default();
        }
        Self::from_aspect(width as f32 / height as f32)
    }

    /// Whether a circle of `radius` fits between the walls at all
    #[inline]
    pub fn fits(&self, radius: f32) -> bool {
        radius <= self.x && radius <= self.y
    }
}
