//! Rendering adapter: presents frames and blends simulation states for display.
//!
//! # Invariants
//! - Renderers never mutate simulation state.
//! - Interpolated values are derived from completed steps only.
//!
//! # Workaround
//! Ships a text renderer that only counts and times presents. The kernel's
//! `Renderer` trait is stable; a GPU backend can replace it without touching
//! game code.

mod interp;
mod renderer;

pub use interp::{Interpolated, Lerp};
pub use renderer::{PresentTimer, TextRenderer};

pub fn crate_info() -> &'static str {
    "rogue-render v0.1.0"
}
