//! The circle entity and its overlap predicate

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A moving disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CircleFields")]
pub struct Circle {
    /// Center in bound space
    pub pos: Vec2,
    /// Already multiplied by VELOCITY_SCALE at creation
    pub vel: Vec2,
    /// Fixed after creation
    pub radius: f32,
    /// Rotation angle (radians), follows simulated time
    pub theta: f32,
    /// RGBA fill color in [0, 1]
    pub color: Vec4,
    /// Model matrix, rebuilt every step
    #[serde(skip_serializing)]
    pub transform: Mat4,
}

/// Serialized form of a circle; the transform is derived on load
#[derive(Deserialize)]
struct CircleFields {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    theta: f32,
    color: Vec4,
}

impl From<CircleFields> for Circle {
    fn from(fields: CircleFields) -> Self {
        let mut circle = Self {
            pos: fields.pos,
            vel: fields.vel,
            radius: fields.radius,
            theta: fields.theta,
            color: fields.color,
            transform: Mat4::IDENTITY,
        };
        circle.update_transform();
        circle
    }
}

impl Circle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Vec4) -> Self {
        let mut circle = Self {
            pos,
            vel,
            radius,
            theta: 0.0,
            color,
            transform: Mat4::IDENTITY,
        };
        circle.update_transform();
        circle
    }

    /// Whether the two closed disks intersect
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    /// Level of collision with another circle: 1.0 overlapping, 0.0 apart
    #[inline]
    pub fn collide(&self, other: &Circle) -> f32 {
        if self.overlaps(other) { 1.0 } else { 0.0 }
    }

    /// Highest collision level against a collection.
    ///
    /// `skip` is this circle's own index when it lives in `circles`.
    pub fn collide_any(&self, circles: &[Circle], skip: Option<usize>) -> f32 {
        circles
            .iter()
            .enumerate()
            .filter(|(j, _)| Some(*j) != skip)
            .map(|(_, c)| self.collide(c))
            .fold(0.0, f32::max)
    }

    /// Rebuild `transform` as Translate * Rotate * Scale
    pub fn update_transform(&mut self) {
        self.transform = Mat4::from_scale_rotation_translation(
            Vec3::new(self.radius, self.radius, 1.0),
            Quat::from_rotation_z(self.theta),
            self.pos.extend(0.0),
        );
    }

    /// Kinetic energy with unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn disc(x: f32, y: f32, radius: f32) -> Circle {
        Circle::new(Vec2::new(x, y), Vec2::ZERO, radius, Vec4::ONE)
    }

    #[test]
    fn test_overlap_predicate() {
        let a = disc(0.0, 0.0, 0.1);
        assert!(a.overlaps(&disc(0.15, 0.0, 0.1)));
        // Exactly touching is not overlapping
        assert!(!a.overlaps(&disc(0.2, 0.0, 0.1)));
        assert!(!a.overlaps(&disc(0.5, 0.5, 0.1)));
    }

    #[test]
    fn test_collide_levels() {
        let a = disc(0.0, 0.0, 0.1);
        assert_eq!(a.collide(&disc(0.05, 0.0, 0.1)), 1.0);
        assert_eq!(a.collide(&disc(1.0, 0.0, 0.1)), 0.0);
    }

    #[test]
    fn test_collide_any_skips_self() {
        let circles = vec![disc(0.0, 0.0, 0.1), disc(0.8, 0.0, 0.1)];
        assert_eq!(circles[0].collide_any(&circles, Some(0)), 0.0);
        // Without the skip a circle always overlaps itself
        assert_eq!(circles[0].collide_any(&circles, None), 1.0);

        let probe = disc(0.75, 0.0, 0.1);
        assert_eq!(probe.collide_any(&circles, None), 1.0);
        assert_eq!(probe.collide_any(&[], None), 0.0);
    }

    #[test]
    fn test_deserialize_rebuilds_transform() {
        let mut c = disc(0.4, 0.1, 0.3);
        c.theta = 0.7;
        c.update_transform();

        let json = serde_json::to_string(&c).expect("serializable");
        assert!(!json.contains("transform"));
        let loaded: Circle = serde_json::from_str(&json).expect("valid circle");
        assert_eq!(loaded, c);
    }

    #[test]
    fn test_transform_maps_unit_circle() {
        let mut c = disc(0.3, -0.2, 0.5);
        c.theta = FRAC_PI_2;
        c.update_transform();

        // Local (1, 0) rotates to (0, 1), scales by radius, then translates
        let p = c.transform.transform_point3(Vec3::X);
        assert!((p.x - 0.3).abs() < 1e-5);
        assert!((p.y - 0.3).abs() < 1e-5);

        let center = c.transform.transform_point3(Vec3::ZERO);
        assert!((center.truncate() - c.pos).length() < 1e-6);
    }
}
