//! Frame tick
//!
//! Applies one frame of input, then steps every circle.

use super::state::{FrameStats, Simulation};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// One more circle (regenerates)
    pub add: bool,
    /// One fewer circle (regenerates)
    pub sub: bool,
    /// Regenerate at the current count
    pub reset: bool,
    /// New viewport size in pixels
    pub viewport: Option<(u32, u32)>,
}

/// Apply `input`, then advance the simulation to wall clock `elapsed` seconds
pub fn tick(sim: &mut Simulation, input: &FrameInput, elapsed: f64) -> FrameStats {
    if let Some((width, height)) = input.viewport {
        sim.resize(width, height);
    }

    let mut count = sim.circle_count;
    if input.add {
        count = count.saturating_add(1);
    }
    if input.sub {
        count = count.saturating_sub(1);
    }

    // A count change already regenerates
    if !sim.set_count(count) && input.reset {
        sim.reset();
    }

    sim.advance(elapsed)
}
