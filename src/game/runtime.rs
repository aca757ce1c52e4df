//! Game Runtime
//!
//! A `Session` is one run of the game, from the first wave to game over.
//! It owns the world and everything the systems need (RNG, simulation time,
//! camera, wave spawner) and runs the fixed-step tick.
//!
//! Restarting builds a new Session; nothing carries over.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::camera::CameraRig;
use super::entity::Entity;
use super::event::Events;
use super::snapshot::{collect_drawables, FrameSnapshot, HudInfo};
use super::systems::{
    ai_system, collision_system, lifetime_system, movement_system, player_control_system,
    shooting_system, Arena, WaveSpawner,
};
use super::world::World;
use crate::config::Tuning;
use crate::input::InputState;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Player health hit zero; the host stops the clock
    GameOver,
}

/// One play-through of the arena
pub struct Session {
    pub world: World,
    pub events: Events,
    pub camera: CameraRig,
    spawner: WaveSpawner,
    /// Simulation randomness; only `tick` draws from it
    rng: StdRng,
    /// Camera jitter; rendering never touches `rng`
    jitter: StdRng,
    tuning: Tuning,
    arena: Arena,

    /// Simulation time in seconds (advances by the fixed step per tick)
    time: f64,
    ticks: u64,
    score: u32,
    phase: Phase,
    player: Entity,
}

impl Session {
    /// Start a session with the player in the middle of the arena.
    pub fn new(tuning: Tuning, arena: Arena) -> Self {
        let rng = match tuning.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = World::new();
        let player = world.spawn_player(arena.center(), &tuning.player);

        Self {
            world,
            events: Events::new(),
            camera: CameraRig::new(&tuning.camera),
            spawner: WaveSpawner::new(),
            rng,
            jitter: StdRng::from_entropy(),
            tuning,
            arena,
            time: 0.0,
            ticks: 0,
            score: 0,
            phase: Phase::Playing,
            player,
        }
    }

    /// Refresh the arena size from the viewport. Only read at wave start.
    pub fn set_arena(&mut self, arena: Arena) {
        self.arena = arena;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wave(&self) -> u32 {
        self.spawner.wave()
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Run one fixed simulation step.
    pub fn tick(&mut self, input: &InputState) {
        if self.phase == Phase::GameOver {
            return;
        }
        let dt = self.tuning.fixed_step as f32;
        let now = self.time;

        // =====================================================================
        // Systems (order matters)
        // =====================================================================
        player_control_system(&mut self.world, input, self.tuning.player.acceleration_gain, dt);
        shooting_system(&mut self.world, input.fire, now, &self.tuning.projectile, &mut self.events);
        movement_system(&mut self.world, dt);
        ai_system(&mut self.world, &self.tuning.ai, now, dt, &mut self.rng, &mut self.events);
        collision_system(&mut self.world, self.tuning.combat.enemy_projectile_damage, &mut self.events);
        lifetime_system(&mut self.world, dt);
        self.spawner
            .update(&mut self.world, self.arena, &self.tuning.waves, dt, &mut self.events);

        self.world.flush_destroyed();

        // =====================================================================
        // Feedback
        // =====================================================================
        if input.fire {
            self.camera.add_shake(self.tuning.camera.fire_shake);
        }
        self.process_events();

        self.time += self.tuning.fixed_step;
        self.ticks += 1;
    }

    fn process_events(&mut self) {
        for hit in self.events.damage.drain() {
            if hit.target != self.player {
                continue;
            }
            self.camera.add_shake(self.tuning.camera.hit_shake);
            log::debug!("player hit by {} for {}, {} left", hit.source, hit.amount, hit.remaining);
            if hit.remaining <= 0 && self.phase == Phase::Playing {
                self.phase = Phase::GameOver;
                log::info!("game over: wave {}, score {}", self.spawner.wave(), self.score);
            }
        }

        for kill in self.events.kills.drain() {
            self.score += kill.score;
        }

        for wave in self.events.waves.drain() {
            log::info!(
                "wave {} begins: {} ground, {} air",
                wave.wave,
                wave.ground_units,
                wave.air_units
            );
        }

        for shot in self.events.shots.drain() {
            log::trace!("{:?} shot {} fired by {}", shot.side, shot.projectile, shot.shooter);
        }

        self.events.clear_all();
    }

    /// Decay camera shake by the real frame delta.
    pub fn update_camera(&mut self, frame_dt: f32) {
        self.camera.update(frame_dt);
    }

    /// Everything the renderer needs for this frame.
    pub fn snapshot(&mut self) -> FrameSnapshot {
        let (health, max_health) = self
            .world
            .health
            .get(self.player)
            .map_or((0, 0), |h| (h.current, h.max));

        FrameSnapshot {
            drawables: collect_drawables(&self.world),
            camera_offset: self.camera.offset(&mut self.jitter),
            hud: HudInfo {
                wave: self.spawner.wave(),
                health,
                max_health,
                score: self.score,
                game_over: self.phase == Phase::GameOver,
            },
        }
    }
}
