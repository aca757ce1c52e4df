//! Lifetime: count down and expire timed entities.

use crate::game::components::ComponentKind;
use crate::game::world::World;

pub fn lifetime_system(world: &mut World, dt: f32) {
    for entity in world.query(&[ComponentKind::Lifetime]) {
        let lifetime = world.lifetimes.get_mut(entity).expect("queried entity has Lifetime");
        lifetime.remaining -= dt;
        if lifetime.remaining <= 0.0 {
            lifetime.remaining = 0.0;
            world.destroy_entity(entity);
        }
    }
}
