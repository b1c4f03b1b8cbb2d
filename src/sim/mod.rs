//! Deterministic circle simulation
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod circle;
pub mod placement;
pub mod state;
pub mod step;
pub mod tick;

pub use circle::Circle;
pub use placement::{Placement, generate};
pub use state::{FrameStats, RngState, Simulation};
pub use step::{CollisionMode, contact_impulse, step, step_frame};
pub use tick::{FrameInput, tick};
