//! Gameplay Systems
//!
//! Each system is a free function over the `World`. The session calls them
//! once per fixed step in this order:
//!
//! 1. player control
//! 2. shooting
//! 3. movement
//! 4. AI
//! 5. collision
//! 6. lifetime
//! 7. wave spawner
//!
//! then flushes destroyed entities. Systems re-query every tick and never
//! hold entity references across ticks.

mod ai;
mod collision;
mod lifetime;
mod movement;
mod player_control;
mod shooting;
mod waves;

pub use ai::ai_system;
pub use collision::collision_system;
pub use lifetime::lifetime_system;
pub use movement::movement_system;
pub use player_control::player_control_system;
pub use shooting::shooting_system;
pub use waves::{Arena, WaveSpawner};

/// Reference frame rate that per-tick constants were tuned against
pub const REFERENCE_FPS: f32 = 60.0;

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
