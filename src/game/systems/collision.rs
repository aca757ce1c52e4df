//! Collision: pairwise AABB overlap and tag-pair resolution.
//!
//! Boxes are centred on the transform position. Every unordered pair is
//! tested once; resolution doesn't depend on which side of the pair an
//! entity is on.

use macroquad::math::Vec2;

use crate::game::components::{Collider, ColliderTag, ComponentKind};
use crate::game::entity::Entity;
use crate::game::event::{DamageEvent, Events, KillEvent};
use crate::game::world::World;

/// Strict AABB overlap test; touching edges don't count.
pub fn overlaps(a_pos: Vec2, a: &Collider, b_pos: Vec2, b: &Collider) -> bool {
    let reach = a.half_extents() + b.half_extents();
    let d = (a_pos - b_pos).abs();
    d.x < reach.x && d.y < reach.y
}

/// Resolve every overlapping pair. `enemy_projectile_damage` is taken from
/// the player's health per enemy shot.
pub fn collision_system(world: &mut World, enemy_projectile_damage: i32, events: &mut Events) {
    let bodies: Vec<(Entity, Vec2, Collider)> = world
        .query(&[ComponentKind::Transform, ComponentKind::Collider])
        .into_iter()
        .map(|e| {
            let pos = world.transforms.get(e).expect("queried entity has Transform").position;
            let col = *world.colliders.get(e).expect("queried entity has Collider");
            (e, pos, col)
        })
        .collect();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, a_pos, a_col) = bodies[i];
            let (b, b_pos, b_col) = bodies[j];
            if !overlaps(a_pos, &a_col, b_pos, &b_col) {
                continue;
            }
            resolve(world, (a, a_col.tag), (b, b_col.tag), enemy_projectile_damage, events);
        }
    }
}

fn resolve(
    world: &mut World,
    a: (Entity, ColliderTag),
    b: (Entity, ColliderTag),
    enemy_projectile_damage: i32,
    events: &mut Events,
) {
    // Normalise so the projectile (if any) comes first
    let (first, second) = match (a.1, b.1) {
        (ColliderTag::Projectile, _) | (ColliderTag::EnemyProjectile, _) => (a, b),
        _ => (b, a),
    };

    match (first.1, second.1) {
        (ColliderTag::Projectile, tag) if tag.is_enemy() => {
            hit_enemy(world, first.0, second.0, events);
        }
        (ColliderTag::EnemyProjectile, ColliderTag::Player) => {
            hit_player(world, first.0, second.0, enemy_projectile_damage, events);
        }
        _ => {}
    }
}

fn hit_enemy(world: &mut World, projectile: Entity, enemy: Entity, events: &mut Events) {
    world.destroy_entity(projectile);
    if world.is_pending_destroy(enemy) {
        return;
    }
    world.destroy_entity(enemy);

    let score = world.scores.get(enemy).map_or(0, |s| s.value);
    let position = world.transforms.get(enemy).map_or(Vec2::ZERO, |t| t.position);
    log::debug!("enemy {enemy} destroyed by {projectile} (+{score})");
    events.kills.send(KillEvent {
        victim: enemy,
        projectile,
        score,
        position,
    });
}

fn hit_player(world: &mut World, projectile: Entity, player: Entity, amount: i32, events: &mut Events) {
    world.destroy_entity(projectile);
    let Some(health) = world.health.get_mut(player) else { return };
    health.damage(amount);
    events.damage.send(DamageEvent {
        target: player,
        source: projectile,
        amount,
        remaining: health.current,
    });
}
