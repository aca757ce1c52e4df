//! Game Foundation Module
//!
//! A small ECS driving a top-down arena shooter.
//!
//! Key concepts:
//! - Entity: Monotonic integer id, never reused
//! - Component: Plain data structs attached to entities
//! - World: Container for all entities and their components
//! - Systems: Free functions over the World, run in a fixed order
//! - Event: Decoupled communication from systems back to the session
//!
//! Design philosophy:
//! - Simple over flexible (we know what game we're making)
//! - Deterministic fixed-step simulation, rendering reads a snapshot
//! - No runtime type registration (compile-time known components)

pub mod camera;
pub mod clock;
pub mod component;
pub mod components;
pub mod entity;
pub mod event;
pub mod renderer;
pub mod runtime;
pub mod snapshot;
pub mod systems;
pub mod world;

// Re-export main types
pub use clock::{FrameHandler, GameClock};
pub use renderer::{ArenaRenderer, Overlay};
pub use runtime::{Phase, Session};
pub use systems::Arena;
