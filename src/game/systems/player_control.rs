//! Player control: turn input into velocity and facing.

use crate::game::components::ComponentKind;
use crate::game::world::World;
use crate::input::InputState;

/// Accelerate toward the input direction, cap speed, face the pointer.
///
/// `acceleration_gain` scales `max_speed` into acceleration per second.
pub fn player_control_system(world: &mut World, input: &InputState, acceleration_gain: f32, dt: f32) {
    let intent = input.move_intent();
    let target = input.pointer_world();

    let players = world.query(&[
        ComponentKind::PlayerControl,
        ComponentKind::Velocity,
        ComponentKind::Transform,
    ]);
    for entity in players {
        let max_speed = world
            .player_controls
            .get(entity)
            .expect("queried entity has PlayerControl")
            .max_speed;

        let velocity = world
            .velocities
            .get_mut(entity)
            .expect("queried entity has Velocity");
        velocity.linear += intent * max_speed * acceleration_gain * dt;
        velocity.linear = velocity.linear.clamp_length_max(max_speed);

        let transform = world
            .transforms
            .get_mut(entity)
            .expect("queried entity has Transform");
        let to_pointer = target - transform.position;
        transform.rotation = to_pointer.y.atan2(to_pointer.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerTuning;
    use approx::assert_relative_eq;
    use macroquad::math::Vec2;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (World, crate::game::entity::Entity) {
        let mut world = World::new();
        let player = world.spawn_player(Vec2::new(100.0, 100.0), &PlayerTuning::default());
        (world, player)
    }

    #[test]
    fn test_accelerates_toward_intent() {
        let (mut world, player) = setup();
        let input = InputState {
            right: true,
            ..Default::default()
        };

        player_control_system(&mut world, &input, 10.0, DT);

        let v = world.velocities.get(player).unwrap().linear;
        assert_relative_eq!(v.x, 50.0, epsilon = 1e-3);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_speed_clamped_direction_kept() {
        let (mut world, player) = setup();
        world.velocities.get_mut(player).unwrap().linear = Vec2::new(290.0, 290.0);
        let input = InputState {
            down: true,
            right: true,
            ..Default::default()
        };

        player_control_system(&mut world, &input, 10.0, DT);

        let v = world.velocities.get(player).unwrap().linear;
        assert_relative_eq!(v.length(), 300.0, epsilon = 1e-3);
        assert_relative_eq!(v.x, v.y, epsilon = 1e-3);
    }

    #[test]
    fn test_faces_pointer() {
        let (mut world, player) = setup();
        let input = InputState {
            pointer: Vec2::new(100.0, 200.0),
            ..Default::default()
        };

        player_control_system(&mut world, &input, 10.0, DT);

        assert_relative_eq!(world.transforms.get(player).unwrap().rotation, FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_no_input_leaves_velocity() {
        let (mut world, player) = setup();
        world.velocities.get_mut(player).unwrap().linear = Vec2::new(10.0, 0.0);

        player_control_system(&mut world, &InputState::default(), 10.0, DT);

        assert_eq!(world.velocities.get(player).unwrap().linear, Vec2::new(10.0, 0.0));
    }
}
