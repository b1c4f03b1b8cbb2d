//! Per-frame circle physics
//!
//! Two frame passes are available:
//! - `PerCircle`: each circle integrates, bounces off walls, then resolves
//!   against every other circle in place. A pair can be resolved twice per
//!   frame, once from each side, and later circles see earlier impulses.
//! - `Snapshot`: all circles integrate first, overlapping pairs are collected
//!   from an immutable copy, then each pair's impulse is applied exactly once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use crate::Bounds;
use crate::consts::VELOCITY_SCALE;

/// How a frame resolves circle-circle contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionMode {
    /// In-place resolution inside each circle's own update
    #[default]
    PerCircle,
    /// Detect from a snapshot, then apply each pair once
    Snapshot,
}

/// Move one circle and bounce it off the walls
fn integrate(circle: &mut Circle, t: f32, dt: f32, bounds: Bounds) {
    circle.theta = t;
    circle.pos += circle.vel * dt * VELOCITY_SCALE;

    if circle.pos.x - circle.radius < -bounds.x {
        circle.pos.x = -bounds.x + circle.radius;
        circle.vel.x = -circle.vel.x;
    } else if circle.pos.x + circle.radius > bounds.x {
        circle.pos.x = bounds.x - circle.radius;
        circle.vel.x = -circle.vel.x;
    }

    if circle.pos.y - circle.radius < -bounds.y {
        circle.pos.y = -bounds.y + circle.radius;
        circle.vel.y = -circle.vel.y;
    } else if circle.pos.y + circle.radius > bounds.y {
        circle.pos.y = bounds.y - circle.radius;
        circle.vel.y = -circle.vel.y;
    }
}

/// Impulse along the line of centers for an approaching overlapping pair.
///
/// Returns `scalar * normal`, to be subtracted from `a` and added to `b`.
/// `None` when apart, separating, or when the centers coincide.
pub fn contact_impulse(a: &Circle, b: &Circle) -> Option<Vec2> {
    if !a.overlaps(b) {
        return None;
    }

    let offset = a.pos - b.pos;
    let distance = offset.length();
    if distance == 0.0 {
        return None;
    }

    let normal = offset / distance;
    let scalar = (a.vel - b.vel).dot(normal);
    (scalar < 0.0).then_some(scalar * normal)
}

/// Advance `circles[index]` by one frame against the whole collection.
///
/// Collision response also changes the other circle's velocity.
pub fn step(circles: &mut [Circle], index: usize, t: f32, dt: f32, bounds: Bounds) {
    integrate(&mut circles[index], t, dt, bounds);

    for j in 0..circles.len() {
        if j == index {
            continue;
        }
        if let Some(impulse) = contact_impulse(&circles[index], &circles[j]) {
            circles[index].vel -= impulse;
            circles[j].vel += impulse;
        }
    }

    circles[index].update_transform();
}

/// Advance every circle by one frame
pub fn step_frame(circles: &mut [Circle], t: f32, dt: f32, bounds: Bounds, mode: CollisionMode) {
    match mode {
        CollisionMode::PerCircle => {
            for index in 0..circles.len() {
                step(circles, index, t, dt, bounds);
            }
        }
        CollisionMode::Snapshot => step_snapshot(circles, t, dt, bounds),
    }
}

fn step_snapshot(circles: &mut [Circle], t: f32, dt: f32, bounds: Bounds) {
    for circle in circles.iter_mut() {
        integrate(circle, t, dt, bounds);
    }

    let snapshot = circles.to_vec();
    let mut impulses = vec![Vec2::ZERO; snapshot.len()];
    for i in 0..snapshot.len() {
        for j in (i + 1)..snapshot.len() {
            if let Some(impulse) = contact_impulse(&snapshot[i], &snapshot[j]) {
                impulses[i] -= impulse;
                impulses[j] += impulse;
            }
        }
    }

    for (circle, impulse) in circles.iter_mut().zip(impulses) {
        circle.vel += impulse;
        circle.update_transform();
    }
}
