//! Game kernel: fixed-timestep loop driver and the time primitives it runs on.
//!
//! # Invariants
//! - Simulation time advances in exact multiples of the update period.
//! - A single frame contributes at most the frame-time cap to the accumulator.
//! - Interpolation is handed to `draw` only and never reaches `update`.

pub mod client;
pub mod clock;
pub mod config;
pub mod platform;
pub mod time;
pub mod timestep;

pub use client::{
    ClientError, ExitStatus, Game, GameClient, HookError, HookResult, LoopControl, LoopState,
    LoopStats,
};
pub use clock::{Clock, ScriptedClock, SystemClock};
pub use config::{ClientConfig, ConfigError};
pub use platform::{Renderer, Window};
pub use time::Time;
pub use timestep::{FixedTimestep, FrameStep};

pub fn crate_info() -> &'static str {
    "rogue-kernel v0.1.0"
}
