//! Movement: integrate velocity into position, then apply friction.

use crate::game::components::ComponentKind;
use crate::game::world::World;

use super::REFERENCE_FPS;

/// Velocity components below this magnitude snap to zero
pub const VELOCITY_SNAP: f32 = 0.1;

/// `position += velocity * dt`, then damp by `(1 - friction)^(dt * 60)`.
pub fn movement_system(world: &mut World, dt: f32) {
    for entity in world.query(&[ComponentKind::Transform, ComponentKind::Velocity]) {
        let velocity = world
            .velocities
            .get_mut(entity)
            .expect("queried entity has Velocity");
        let linear = velocity.linear;

        if velocity.friction > 0.0 {
            let damping = (1.0 - velocity.friction).powf(dt * REFERENCE_FPS);
            velocity.linear *= damping;
            if velocity.linear.x.abs() < VELOCITY_SNAP {
                velocity.linear.x = 0.0;
            }
            if velocity.linear.y.abs() < VELOCITY_SNAP {
                velocity.linear.y = 0.0;
            }
        }

        let transform = world
            .transforms
            .get_mut(entity)
            .expect("queried entity has Transform");
        transform.position += linear * dt;
    }
}
