//! Wave spawning
//!
//! When the arena is clear, the next wave spawns in rings around the arena
//! centre: `base + per_wave * n` ground units, plus `n / 2` air units from
//! `air_start_wave` on. A settle timer stops the spawner from firing twice
//! before the new enemies are visible to queries.

use std::f32::consts::TAU;

use macroquad::math::Vec2;

use crate::config::WaveTuning;
use crate::game::components::{ComponentKind, Locomotion};
use crate::game::event::{Events, WaveEvent};
use crate::game::world::World;

/// Playfield size in simulation units, refreshed from the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaveSpawner {
    wave: u32,
    in_progress: bool,
    /// Seconds until `in_progress` clears
    settle_timer: f32,
}

impl WaveSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current wave number (0 before the first wave)
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Ground and air unit counts for wave `n`.
    pub fn composition(settings: &WaveTuning, n: u32) -> (u32, u32) {
        let ground = settings.base_enemies + settings.enemies_per_wave * n;
        let air = if n >= settings.air_start_wave { n / 2 } else { 0 };
        (ground, air)
    }

    /// Run once per fixed step.
    pub fn update(&mut self, world: &mut World, arena: Arena, settings: &WaveTuning, dt: f32, events: &mut Events) {
        if self.in_progress {
            self.settle_timer -= dt;
            if self.settle_timer <= 0.0 {
                self.in_progress = false;
            }
        }
        if self.in_progress || !world.query(&[ComponentKind::AiControl]).is_empty() {
            return;
        }
        self.start_wave(world, arena, settings, events);
    }

    fn start_wave(&mut self, world: &mut World, arena: Arena, settings: &WaveTuning, events: &mut Events) {
        self.wave += 1;
        self.in_progress = true;
        self.settle_timer = settings.settle_delay;

        let (ground, air) = Self::composition(settings, self.wave);
        let center = arena.center();

        let radius = arena.max_side() * settings.ground_radius_factor;
        for i in 0..ground {
            let angle = i as f32 / ground as f32 * TAU;
            let position = center + Vec2::new(angle.cos(), angle.sin()) * radius;
            world.spawn_enemy(position, angle + TAU / 2.0, &settings.ground, Locomotion::Ground);
        }

        let radius = arena.max_side() * settings.air_radius_factor;
        for i in 0..air {
            let angle = i as f32 / air as f32 * TAU + settings.air_phase_offset;
            let position = center + Vec2::new(angle.cos(), angle.sin()) * radius;
            world.spawn_enemy(position, angle + TAU / 2.0, &settings.air, Locomotion::Air);
        }

        log::debug!("wave {} placed around {center}", self.wave);
        events.waves.send(WaveEvent {
            wave: self.wave,
            ground_units: ground,
            air_units: air,
        });
    }
}
