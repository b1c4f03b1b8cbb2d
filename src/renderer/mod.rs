//! Render-facing output
//!
//! The simulation does not draw. It hands each frame's circles to an external
//! renderer as instance data.

pub mod instance;

pub use instance::{CircleInstance, aspect_matrix, instances};
