//! Window side of the game loop: OS-style message pumping and quit signalling.
//!
//! # Invariants
//! - `process_messages` never blocks.
//! - Once quit is signalled it stays signalled.

pub mod headless;
pub mod message;

pub use headless::HeadlessWindow;
pub use message::WindowMessage;

pub fn crate_info() -> &'static str {
    "rogue-input v0.1.0"
}
