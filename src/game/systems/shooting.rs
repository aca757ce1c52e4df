//! Player shooting.

use macroquad::math::Vec2;

use crate::config::ProjectileTuning;
use crate::game::components::{ColliderTag, ComponentKind};
use crate::game::event::{Events, ShotEvent, Shooter};
use crate::game::world::{ProjectileSpec, World, PROJECTILE_COLOR};

/// Fire from every player-controlled weapon while the trigger is held.
///
/// Enemies carry weapons too, so the query also requires `PlayerControl`;
/// otherwise the fire input would trigger every enemy gun. Enemy weapons are
/// driven by the AI system instead.
pub fn shooting_system(
    world: &mut World,
    fire: bool,
    now: f64,
    settings: &ProjectileTuning,
    events: &mut Events,
) {
    if !fire {
        return;
    }

    let shooters = world.query(&[
        ComponentKind::Transform,
        ComponentKind::Weapon,
        ComponentKind::PlayerControl,
    ]);
    for entity in shooters {
        let weapon = world.weapons.get_mut(entity).expect("queried entity has Weapon");
        if !weapon.ready(now) {
            continue;
        }
        weapon.mark_fired(now);
        let speed = weapon.projectile_speed;

        let transform = *world.transforms.get(entity).expect("queried entity has Transform");
        let spec = ProjectileSpec {
            origin: transform.position + transform.forward() * settings.muzzle_offset,
            rotation: transform.rotation,
            heading: transform.rotation,
            speed,
            tag: ColliderTag::Projectile,
            color: PROJECTILE_COLOR,
            sprite_size: Vec2::splat(settings.size),
            collider_size: settings.size,
            lifetime: settings.lifetime,
        };
        let projectile = world.spawn_projectile(&spec);
        events.shots.send(ShotEvent {
            shooter: entity,
            projectile,
            side: Shooter::Player,
        });
    }
}
