//! Enemy AI
//!
//! A small state machine per enemy, evaluated against the first player:
//!
//! - Idle: drift randomly until the player comes within detection range
//! - Chase: close in, keep spacing from other enemies, shoot when in range
//! - Strafe: air units fly fixed-speed runs, turning slowly toward the player
//! - Circle: orbit the player and shoot
//!
//! Ground units only move between Idle and Chase. Air units spawn in Strafe
//! and stay there.

use macroquad::math::Vec2;
use rand::Rng;

use crate::config::AiTuning;
use crate::game::components::{AiState, ColliderTag, ComponentKind, Transform, Velocity};
use crate::game::entity::Entity;
use crate::game::event::{Events, ShotEvent, Shooter};
use crate::game::world::{ProjectileSpec, World, ENEMY_PROJECTILE_COLOR, TRACER_COLOR};

use super::{wrap_angle, REFERENCE_FPS};

/// Tracer sprite size (thin and long)
const TRACER_SIZE: Vec2 = Vec2::new(4.0, 8.0);

/// Which shot an enemy fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShotKind {
    Bullet,
    Tracer,
}

pub fn ai_system<R: Rng>(
    world: &mut World,
    settings: &AiTuning,
    now: f64,
    dt: f32,
    rng: &mut R,
    events: &mut Events,
) {
    let Some(player) = world.player() else { return };
    let player_pos = world.transforms.get(player).expect("player has Transform").position;

    let agents = world.query(&[
        ComponentKind::Transform,
        ComponentKind::Velocity,
        ComponentKind::AiControl,
    ]);
    // AI never moves entities directly, so positions hold for the whole pass
    let positions: Vec<(Entity, Vec2)> = agents
        .iter()
        .map(|&e| (e, world.transforms.get(e).expect("queried entity has Transform").position))
        .collect();

    for &(entity, position) in &positions {
        let ai = *world.ai.get(entity).expect("queried entity has AiControl");
        let to_player = player_pos - position;
        let distance = to_player.length();
        let direction = to_player.normalize_or_zero();
        let facing = to_player.y.atan2(to_player.x);

        match ai.state {
            AiState::Idle => {
                if distance <= ai.detection_radius {
                    set_state(world, entity, AiState::Chase);
                } else if rng.gen::<f32>() < settings.wander_chance {
                    let nudge = Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5))
                        * settings.wander_impulse;
                    velocity_mut(world, entity).linear += nudge;
                }
            }
            AiState::Chase => {
                if distance > ai.detection_radius * settings.chase_exit_factor {
                    set_state(world, entity, AiState::Idle);
                    continue;
                }
                let separation = separation(entity, position, &positions, settings.separation_radius);
                velocity_mut(world, entity).linear +=
                    direction * settings.chase_impulse + separation * settings.separation_strength;
                transform_mut(world, entity).rotation = facing;

                if distance < settings.fire_range {
                    try_fire(world, entity, facing, ShotKind::Bullet, settings, now, events);
                }
            }
            AiState::Strafe => {
                if distance > settings.strafe_engage_range {
                    velocity_mut(world, entity).linear = direction * settings.strafe_speed;
                    transform_mut(world, entity).rotation = facing;
                    continue;
                }
                let max_turn = settings.strafe_turn_rate * dt * REFERENCE_FPS;
                let transform = transform_mut(world, entity);
                let turn = wrap_angle(facing - transform.rotation).clamp(-max_turn, max_turn);
                transform.rotation = wrap_angle(transform.rotation + turn);
                let heading = transform.rotation;
                let forward = transform.forward();
                velocity_mut(world, entity).linear = forward * settings.strafe_speed;

                // Spread is only rolled for shots that actually leave the barrel
                if !weapon_ready(world, entity, now) {
                    continue;
                }
                let half_spread = settings.strafe_spread * 0.5;
                let spread = if half_spread > 0.0 {
                    rng.gen_range(-half_spread..=half_spread)
                } else {
                    0.0
                };
                try_fire(world, entity, heading + spread, ShotKind::Tracer, settings, now, events);
            }
            AiState::Circle => {
                let tangent = Vec2::new(-direction.y, direction.x);
                velocity_mut(world, entity).linear = tangent * settings.strafe_speed;
                transform_mut(world, entity).rotation = facing;

                if distance < settings.fire_range {
                    try_fire(world, entity, facing, ShotKind::Bullet, settings, now, events);
                }
            }
        }
    }
}

fn set_state(world: &mut World, entity: Entity, state: AiState) {
    if let Some(ai) = world.ai.get_mut(entity) {
        ai.state = state;
    }
}

fn velocity_mut(world: &mut World, entity: Entity) -> &mut Velocity {
    world.velocities.get_mut(entity).expect("queried entity has Velocity")
}

fn transform_mut(world: &mut World, entity: Entity) -> &mut Transform {
    world.transforms.get_mut(entity).expect("queried entity has Transform")
}

/// Sum of offsets away from every other agent closer than `radius`.
fn separation(entity: Entity, position: Vec2, agents: &[(Entity, Vec2)], radius: f32) -> Vec2 {
    agents
        .iter()
        .filter(|(other, _)| *other != entity)
        .map(|&(_, other_pos)| position - other_pos)
        .filter(|offset| offset.length() < radius)
        .sum()
}

fn weapon_ready(world: &World, entity: Entity, now: f64) -> bool {
    world.weapons.get(entity).is_some_and(|w| w.ready(now))
}

/// Fire the entity's weapon along `heading` if it has one and it's ready.
fn try_fire(
    world: &mut World,
    entity: Entity,
    heading: f32,
    kind: ShotKind,
    settings: &AiTuning,
    now: f64,
    events: &mut Events,
) {
    let Some(weapon) = world.weapons.get_mut(entity) else { return };
    if !weapon.ready(now) {
        return;
    }
    weapon.mark_fired(now);
    let speed = weapon.projectile_speed;

    let transform = *world.transforms.get(entity).expect("queried entity has Transform");
    let spec = match kind {
        ShotKind::Bullet => ProjectileSpec {
            origin: transform.position + transform.forward() * settings.muzzle_offset,
            rotation: heading,
            heading,
            speed,
            tag: ColliderTag::EnemyProjectile,
            color: ENEMY_PROJECTILE_COLOR,
            sprite_size: Vec2::splat(settings.enemy_projectile_size),
            collider_size: settings.enemy_projectile_size,
            lifetime: settings.enemy_projectile_lifetime,
        },
        ShotKind::Tracer => ProjectileSpec {
            origin: transform.position + transform.forward() * settings.strafe_muzzle_offset,
            rotation: transform.rotation,
            heading,
            speed,
            tag: ColliderTag::EnemyProjectile,
            color: TRACER_COLOR,
            sprite_size: TRACER_SIZE,
            collider_size: settings.enemy_projectile_size,
            lifetime: settings.tracer_lifetime,
        },
    };
    let projectile = world.spawn_projectile(&spec);
    events.shots.send(ShotEvent {
        shooter: entity,
        projectile,
        side: Shooter::Enemy,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnemyTuning, PlayerTuning};
    use crate::game::components::Locomotion;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn calm() -> AiTuning {
        AiTuning {
            wander_chance: 0.0,
            ..AiTuning::default()
        }
    }

    fn setup() -> World {
        let mut world = World::new();
        world.spawn_player(Vec2::ZERO, &PlayerTuning::default());
        world
    }

    fn ground(world: &mut World, pos: Vec2) -> Entity {
        world.spawn_enemy(pos, 0.0, &EnemyTuning::default(), Locomotion::Ground)
    }

    fn air(world: &mut World, pos: Vec2) -> Entity {
        world.spawn_enemy(pos, 0.0, &EnemyTuning::air(), Locomotion::Air)
    }

    fn run(world: &mut World, settings: &AiTuning, now: f64) -> Events {
        let mut events = Events::new();
        let mut rng = StdRng::seed_from_u64(42);
        ai_system(world, settings, now, DT, &mut rng, &mut events);
        events
    }

    fn state(world: &World, e: Entity) -> AiState {
        world.ai.get(e).unwrap().state
    }

    #[test]
    fn test_idle_to_chase_at_exact_radius() {
        let mut world = setup();
        let at_edge = ground(&mut world, Vec2::new(1000.0, 0.0));
        let outside = ground(&mut world, Vec2::new(0.0, 1000.5));

        run(&mut world, &calm(), 0.0);

        assert_eq!(state(&world, at_edge), AiState::Chase);
        assert_eq!(state(&world, outside), AiState::Idle);
        assert_eq!(world.velocities.get(outside).unwrap().linear, Vec2::ZERO);
    }

    #[test]
    fn test_chase_exit_boundary() {
        let mut world = setup();
        let at_exit = ground(&mut world, Vec2::new(1500.0, 0.0));
        let beyond = ground(&mut world, Vec2::new(-1500.5, 0.0));
        world.ai.get_mut(at_exit).unwrap().state = AiState::Chase;
        world.ai.get_mut(beyond).unwrap().state = AiState::Chase;

        run(&mut world, &calm(), 0.0);

        assert_eq!(state(&world, at_exit), AiState::Chase);
        assert_eq!(state(&world, beyond), AiState::Idle);
    }

    #[test]
    fn test_no_player_does_nothing() {
        let mut world = World::new();
        let e = ground(&mut world, Vec2::new(10.0, 0.0));

        run(&mut world, &AiTuning::default(), 0.0);

        assert_eq!(state(&world, e), AiState::Idle);
        assert_eq!(world.velocities.get(e).unwrap().linear, Vec2::ZERO);
    }

    #[test]
    fn test_chase_moves_toward_and_faces_player() {
        let mut world = setup();
        let e = ground(&mut world, Vec2::new(0.0, 800.0));
        world.ai.get_mut(e).unwrap().state = AiState::Chase;

        let events = run(&mut world, &calm(), 0.0);

        let v = world.velocities.get(e).unwrap().linear;
        assert_relative_eq!(v.y, -3.0, epsilon = 1e-5);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(
            world.transforms.get(e).unwrap().rotation,
            -std::f32::consts::FRAC_PI_2,
            epsilon = 1e-5
        );
        // Out of fire range
        assert!(events.shots.is_empty());
    }

    #[test]
    fn test_chase_fires_in_range_with_cooldown() {
        let mut world = setup();
        let e = ground(&mut world, Vec2::new(300.0, 0.0));
        world.ai.get_mut(e).unwrap().state = AiState::Chase;
        let settings = calm();

        let events = run(&mut world, &settings, 5.0);
        assert_eq!(events.shots.len(), 1);
        let shot = events.shots.iter().next().unwrap().projectile;
        assert_eq!(world.colliders.get(shot).unwrap().tag, ColliderTag::EnemyProjectile);
        assert_eq!(world.lifetimes.get(shot).unwrap().remaining, 2.0);
        assert_relative_eq!(world.transforms.get(shot).unwrap().position.x, 280.0, epsilon = 1e-3);

        // Ground weapon cooldown is 2 s
        assert!(run(&mut world, &settings, 6.0).shots.is_empty());
        assert_eq!(run(&mut world, &settings, 7.0).shots.len(), 1);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let mut world = setup();
        let a = ground(&mut world, Vec2::new(500.0, 10.0));
        let b = ground(&mut world, Vec2::new(500.0, -10.0));
        world.ai.get_mut(a).unwrap().state = AiState::Chase;
        world.ai.get_mut(b).unwrap().state = AiState::Chase;

        run(&mut world, &calm(), 0.0);

        assert!(world.velocities.get(a).unwrap().linear.y > 0.0);
        assert!(world.velocities.get(b).unwrap().linear.y < 0.0);
    }

    #[test]
    fn test_ground_unit_never_strafes() {
        let mut world = setup();
        let e = ground(&mut world, Vec2::new(900.0, 0.0));
        let settings = calm();

        for step in 0..5 {
            run(&mut world, &settings, step as f64);
            assert_ne!(state(&world, e), AiState::Strafe);
        }
        world.transforms.get_mut(e).unwrap().position = Vec2::new(5000.0, 0.0);
        run(&mut world, &settings, 10.0);
        assert_eq!(state(&world, e), AiState::Idle);
    }

    #[test]
    fn test_far_strafe_flies_at_player() {
        let mut world = setup();
        let e = air(&mut world, Vec2::new(1000.0, 0.0));

        run(&mut world, &calm(), 0.0);

        let v = world.velocities.get(e).unwrap().linear;
        assert_relative_eq!(v.x, -180.0, epsilon = 1e-3);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-3);
        assert_eq!(state(&world, e), AiState::Strafe);
    }

    #[test]
    fn test_near_strafe_turns_slowly_and_fires_tracers() {
        let mut world = setup();
        // Facing +x, player straight below
        let e = air(&mut world, Vec2::new(0.0, -300.0));

        let events = run(&mut world, &calm(), 0.0);

        let rotation = world.transforms.get(e).unwrap().rotation;
        assert_relative_eq!(rotation, 0.02, epsilon = 1e-4);
        let v = world.velocities.get(e).unwrap().linear;
        assert_relative_eq!(v.length(), 180.0, epsilon = 1e-2);

        assert_eq!(events.shots.len(), 1);
        let tracer = events.shots.iter().next().unwrap().projectile;
        assert_eq!(world.lifetimes.get(tracer).unwrap().remaining, 1.5);
        let tv = world.velocities.get(tracer).unwrap().linear;
        let heading = tv.y.atan2(tv.x);
        assert!((heading - rotation).abs() <= 0.1 + 1e-4);
        assert_eq!(world.sprites.get(tracer).unwrap().width, 4.0);
    }

    #[test]
    fn test_strafe_on_cooldown_leaves_rng_alone() {
        let mut world = setup();
        let e = air(&mut world, Vec2::new(0.0, -300.0));
        world.weapons.get_mut(e).unwrap().mark_fired(0.0);

        let mut rng = StdRng::seed_from_u64(42);
        let mut events = Events::new();
        ai_system(&mut world, &calm(), 0.1, DT, &mut rng, &mut events);

        assert!(events.shots.is_empty());
        let mut untouched = StdRng::seed_from_u64(42);
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
        // Still flying and turning while the gun cools
        assert_relative_eq!(world.velocities.get(e).unwrap().linear.length(), 180.0, epsilon = 1e-2);
    }

    #[test]
    fn test_strafe_turns_the_short_way_round() {
        let mut world = setup();
        let e = air(&mut world, Vec2::new(100.0, 1.0));
        // Facing almost -PI, player lies just across the wrap at +PI side
        world.transforms.get_mut(e).unwrap().rotation = 3.1;

        run(&mut world, &calm(), 0.0);

        let rotation = world.transforms.get(e).unwrap().rotation;
        // Turned counter-clockwise through PI, not all the way back
        assert!(rotation > 3.1 || rotation < -3.1);
    }

    #[test]
    fn test_circle_orbits_tangentially() {
        let mut world = setup();
        let e = ground(&mut world, Vec2::new(200.0, 0.0));
        world.ai.get_mut(e).unwrap().state = AiState::Circle;

        run(&mut world, &calm(), 0.0);

        let v = world.velocities.get(e).unwrap().linear;
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(v.y.abs(), 180.0, epsilon = 1e-3);
        assert_eq!(state(&world, e), AiState::Circle);
    }

    #[test]
    fn test_idle_wander_is_random_nudge() {
        let mut world = setup();
        let e = ground(&mut world, Vec2::new(5000.0, 0.0));
        let always = AiTuning {
            wander_chance: 1.0,
            ..AiTuning::default()
        };

        run(&mut world, &always, 0.0);

        let v = world.velocities.get(e).unwrap().linear;
        assert!(v != Vec2::ZERO);
        assert!(v.x.abs() <= 10.0 && v.y.abs() <= 10.0);
    }
}
