//! Gameplay events
//!
//! Systems report what happened during a tick by sending events instead of
//! reaching into session state. The session drains the queues after every
//! fixed step to update score, camera shake and the game-over phase.
//!
//! For example, the collision system sends a `DamageEvent` when an enemy
//! shot lands; the session reacts with camera shake and the game-over check.

use macroquad::math::Vec2;

use super::entity::Entity;

/// FIFO of one event type, filled during a tick and drained afterwards.
#[derive(Debug)]
pub struct EventQueue<T> {
    pending: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.pending.push(event);
    }

    /// Peek at queued events in send order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.pending.iter()
    }

    /// Take every queued event, leaving the queue empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One queue per event type.
#[derive(Debug, Default)]
pub struct Events {
    /// The player took damage
    pub damage: EventQueue<DamageEvent>,

    /// An enemy was shot down
    pub kills: EventQueue<KillEvent>,

    /// Someone fired a projectile
    pub shots: EventQueue<ShotEvent>,

    /// A new wave was spawned
    pub waves: EventQueue<WaveEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues.
    pub fn clear_all(&mut self) {
        self.damage.clear();
        self.kills.clear();
        self.shots.clear();
        self.waves.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// An enemy shot landed on the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub target: Entity,
    /// The projectile that hit
    pub source: Entity,
    pub amount: i32,
    /// Health left after the hit
    pub remaining: i32,
}

/// An enemy was destroyed by a player projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillEvent {
    pub victim: Entity,
    pub projectile: Entity,
    /// Score carried by the victim (0 if it had none)
    pub score: u32,
    pub position: Vec2,
}

/// Who pulled the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shooter {
    Player,
    Enemy,
}

/// A projectile was spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotEvent {
    pub shooter: Entity,
    pub projectile: Entity,
    pub side: Shooter,
}

/// A wave started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveEvent {
    pub wave: u32,
    pub ground_units: u32,
    pub air_units: u32,
}
