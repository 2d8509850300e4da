//! Shared spatial primitives for the rogue engine.
//!
//! # Invariants
//! - `Point` storage is a flat `(x, y, z)` triple; orientation only affects construction.
//! - Axis permutation tables are compile-time constants.

mod axis;
mod plane;
mod point;

pub use axis::{Axis, AxisError, COL_AXIS, DEPTH_AXIS, ROW_AXIS};
pub use plane::PlaneIter;
pub use point::Point;

pub fn crate_info() -> &'static str {
    "rogue-common v0.1.0"
}
