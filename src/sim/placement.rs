//! Procedural placement of non-overlapping circles
//!
//! Rejection sampling inside the walls with a fixed attempt budget. Dense
//! batches may come back short; the returned `Placement` says by how much.

use glam::{Vec2, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use crate::Bounds;
use crate::consts::*;

/// Outcome of a placement run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub circles: Vec<Circle>,
    /// Count the caller asked for
    pub requested: u32,
    /// Candidates drawn, accepted or not
    pub attempts: u32,
}

impl Placement {
    /// True when fewer circles were packed than requested
    pub fn is_short(&self) -> bool {
        (self.circles.len() as u32) < self.requested
    }
}

/// Radius for one candidate in a batch of `count`
fn sample_radius<R: Rng>(rng: &mut R, count: u32) -> f32 {
    let factor = rng.random_range(RADIUS_MIN_FACTOR..RADIUS_MAX_FACTOR);
    (factor * RADIUS_COUNT_SCALE / (count as f32).sqrt()).max(MIN_RADIUS)
}

/// Uniform sample in [-extent, extent]
#[inline]
fn sample_symmetric<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.random_range(-extent..=extent)
    } else {
        0.0
    }
}

/// Generate up to `count` circles that fit inside `bounds` without overlapping
pub fn generate<R: Rng>(count: u32, bounds: Bounds, rng: &mut R) -> Placement {
    let mut circles: Vec<Circle> = Vec::with_capacity(count as usize);
    let mut attempts = 0;

    while attempts < PLACEMENT_ATTEMPTS && (circles.len() as u32) < count {
        attempts += 1;

        let radius = sample_radius(rng, count);
        if !bounds.fits(radius) {
            continue;
        }

        let pos = Vec2::new(
            sample_symmetric(rng, bounds.x - radius),
            sample_symmetric(rng, bounds.y - radius),
        );

        let mut candidate = Circle::new(pos, Vec2::ZERO, radius, Vec4::ONE);
        if candidate.collide_any(&circles, None) > 0.0 {
            continue;
        }

        candidate.color = Vec4::new(
            rng.random_range(0.0..=1.0),
            rng.random_range(0.0..=1.0),
            rng.random_range(0.0..=1.0),
            1.0,
        );
        candidate.vel = Vec2::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        ) * VELOCITY_SCALE;

        circles.push(candidate);
    }

    let placement = Placement {
        circles,
        requested: count,
        attempts,
    };

    if placement.is_short() {
        log::warn!(
            "Packed {} of {} circles in {} attempts",
            placement.circles.len(),
            count,
            attempts
        );
    } else {
        log::debug!("Packed {} circles in {} attempts", count, attempts);
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn mean_radius(circles: &[Circle]) -> f32 {
        circles.iter().map(|c| c.radius).sum::<f32>() / circles.len() as f32
    }

    #[test]
    fn test_generate_no_overlap() {
        let mut rng = Pcg32::seed_from_u64(7);
        let placement = generate(32, Bounds::new(1.5, 1.0), &mut rng);
        let circles = &placement.circles;
        assert_eq!(circles.len(), 32);

        for i in 0..circles.len() {
            for j in (i + 1)..circles.len() {
                let d = circles[i].pos.distance(circles[j].pos);
                assert!(d >= circles[i].radius + circles[j].radius - 1e-6);
            }
        }
    }

    #[test]
    fn test_generate_inside_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let bounds = Bounds::new(1.0, 1.78);
        for c in generate(24, bounds, &mut rng).circles {
            assert!(c.pos.x.abs() + c.radius <= bounds.x + 1e-6);
            assert!(c.pos.y.abs() + c.radius <= bounds.y + 1e-6);
            assert!(c.radius > 0.0);
            assert_eq!(c.color.w, 1.0);
            assert!(c.vel.abs().max_element() <= VELOCITY_SCALE);
        }
    }

    #[test]
    fn test_generate_zero_count() {
        let mut rng = Pcg32::seed_from_u64(1);
        let placement = generate(0, Bounds::default(), &mut rng);
        assert!(placement.circles.is_empty());
        assert_eq!(placement.attempts, 0);
        assert!(!placement.is_short());
    }

    #[test]
    fn test_generate_short_when_crowded() {
        // Radii for count=4 are at least 0.1, four of them cannot share this box
        let mut rng = Pcg32::seed_from_u64(3);
        let placement = generate(4, Bounds::new(0.2, 0.2), &mut rng);
        assert!(placement.is_short());
        assert_eq!(placement.attempts, PLACEMENT_ATTEMPTS);
        assert!(placement.circles.len() < 4);
    }

    #[test]
    fn test_generate_rejects_oversized_radius() {
        let mut rng = Pcg32::seed_from_u64(5);
        // Smallest possible radius for count=1 is 0.2
        let placement = generate(1, Bounds::new(0.1, 0.1), &mut rng);
        assert!(placement.circles.is_empty());
        assert_eq!(placement.attempts, PLACEMENT_ATTEMPTS);
    }

    #[test]
    fn test_radius_scales_with_inverse_sqrt_count() {
        let bounds = Bounds::new(2.0, 2.0);
        let mut small = Vec::new();
        let mut large = Vec::new();
        for seed in 0..40 {
            let mut rng = Pcg32::seed_from_u64(seed);
            small.extend(generate(4, bounds, &mut rng).circles);
            large.extend(generate(16, bounds, &mut rng).circles);
        }

        let ratio = mean_radius(&large) / mean_radius(&small);
        assert!((ratio - 0.5).abs() < 0.08, "ratio = {}", ratio);
    }

    #[test]
    fn test_radius_floor_for_huge_count() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..100 {
            assert!(sample_radius(&mut rng, u32::MAX) >= MIN_RADIUS);
        }
    }
}
