//! Input handling
//!
//! Keyboard and mouse are sampled once per host frame into an immutable
//! `InputState` value. Every fixed step of that frame sees the same value,
//! so the simulation never touches the window directly.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
