//! Simulation state
//!
//! Owns the circle collection plus the loop state: requested count, bounds,
//! simulated clock and the seeded RNG used for regeneration.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::placement::generate;
use super::step::{CollisionMode, step_frame};
use crate::Bounds;
use crate::settings::Settings;

/// RNG state wrapper for serialization.
///
/// Every regeneration uses a fresh stream so resets give new layouts while
/// the whole run stays reproducible from the seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// RNG for the next batch, advancing the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = self.to_rng();
        self.stream += 1;
        rng
    }
}

/// Per-frame summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame: u64,
    pub circles: usize,
    /// Circles overlapping at least one other circle
    pub overlapping: usize,
    /// Sum of 0.5 * |v|^2
    pub kinetic_energy: f32,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub rng_state: RngState,
    /// Count requested for the next regeneration
    pub circle_count: u32,
    pub circle_min: u32,
    pub circle_max: u32,
    pub bounds: Bounds,
    pub mode: CollisionMode,
    /// Wall clock seconds -> simulated time
    pub time_scale: f64,
    /// Simulated time of the last frame
    pub time: f64,
    pub frame: u64,
    /// Live collection, replaced wholesale on regeneration
    pub circles: Vec<Circle>,
    /// Attempts spent on the current collection
    pub placement_attempts: u32,
}

impl Simulation {
    pub fn new(settings: &Settings) -> Self {
        let settings = settings.clone().sanitized();
        let mut sim = Self {
            rng_state: RngState::new(settings.seed),
            circle_count: settings.circle_count,
            circle_min: settings.circle_min,
            circle_max: settings.circle_max,
            bounds: Bounds::from_viewport(settings.viewport.0, settings.viewport.1),
            mode: settings.collision_mode,
            time_scale: settings.time_scale,
            time: 0.0,
            frame: 0,
            circles: Vec::new(),
            placement_attempts: 0,
        };
        sim.regenerate();
        sim
    }

    /// Replace the collection with a fresh batch at the current count.
    ///
    /// Returns false when the batch came back short.
    pub fn regenerate(&mut self) -> bool {
        let mut rng = self.rng_state.next_rng();
        let placement = generate(self.circle_count, self.bounds, &mut rng);
        log::info!(
            "Generated {}/{} circles (bounds {:.2} x {:.2})",
            placement.circles.len(),
            placement.requested,
            self.bounds.x,
            self.bounds.y
        );
        let full = !placement.is_short();
        self.placement_attempts = placement.attempts;
        self.circles = placement.circles;
        full
    }

    /// Change the requested count (clamped) and regenerate if it changed
    pub fn set_count(&mut self, count: u32) -> bool {
        let low = self.circle_min.min(self.circle_max);
        let high = self.circle_min.max(self.circle_max);
        let count = count.clamp(low, high);
        if count == self.circle_count {
            return false;
        }
        self.circle_count = count;
        log::info!("Number of circles = {}", count);
        self.regenerate();
        true
    }

    pub fn reset(&mut self) {
        log::info!("Reset circles");
        self.regenerate();
    }

    /// Recompute bounds for a new viewport. Circles are kept as they are.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.bounds = Bounds::from_viewport(width, height);
    }

    /// Advance to wall clock `elapsed` seconds
    pub fn advance(&mut self, elapsed: f64) -> FrameStats {
        let t = elapsed * self.time_scale;
        let dt = t - self.time;
        step_frame(&mut self.circles, t as f32, dt as f32, self.bounds, self.mode);
        self.time = t;
        self.frame += 1;

        let stats = self.stats();
        log::debug!(
            "Frame {}: {} circles, {} overlapping, energy {:.4}",
            stats.frame,
            stats.circles,
            stats.overlapping,
            stats.kinetic_energy
        );
        stats
    }

    pub fn stats(&self) -> FrameStats {
        let overlapping = (0..self.circles.len())
            .filter(|&i| self.circles[i].collide_any(&self.circles, Some(i)) > 0.0)
            .count();
        FrameStats {
            frame: self.frame,
            circles: self.circles.len(),
            overlapping,
            kinetic_energy: self.circles.iter().map(Circle::kinetic_energy).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::instances;

    #[test]
    fn test_new_sanitizes_inverted_limits() {
        let mut sim = Simulation::new(&Settings {
            circle_min: 40,
            circle_max: 10,
            circle_count: 16,
            ..Default::default()
        });
        assert_eq!((sim.circle_min, sim.circle_max), (10, 40));

        assert!(sim.set_count(20));
        assert_eq!(sim.circle_count, 20);
        assert!(!sim.set_count(20));
    }

    #[test]
    fn test_set_count_with_inverted_fields() {
        let mut sim = Simulation::new(&Settings::default());
        sim.circle_min = 24;
        sim.circle_max = 18;
        sim.set_count(100);
        assert_eq!(sim.circle_count, 24);
        sim.set_count(0);
        assert_eq!(sim.circle_count, 18);
    }

    #[test]
    fn test_json_round_trip_keeps_instances() {
        let mut sim = Simulation::new(&Settings::default());
        sim.advance(0.5);
        let before = instances(&sim.circles);

        let json = serde_json::to_string(&sim).expect("serializable");
        let loaded: Simulation = serde_json::from_str(&json).expect("valid simulation");
        let after = instances(&loaded.circles);

        assert_eq!(before, after);
        assert!(after.iter().all(|i| i.model != glam::Mat4::IDENTITY.to_cols_array()));
    }
}
