//! Input state
//!
//! `InputState` is plain data: four direction flags, the fire flag and the
//! pointer. `sample` is the only place that reads macroquad's input globals.

use macroquad::prelude::*;

use super::{action_down, Action};

/// Maps pointer coordinates from display space into simulation space:
/// `sim = (display - offset) * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapping {
    pub offset: Vec2,
    pub scale: f32,
}

impl PointerMapping {
    pub fn new(offset: Vec2, scale: f32) -> Self {
        Self { offset, scale }
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }

    pub fn to_simulation(&self, display: Vec2) -> Vec2 {
        (display - self.offset) * self.scale
    }
}

impl Default for PointerMapping {
    fn default() -> Self {
        Self::identity()
    }
}

/// One frame's worth of player intent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Raw pointer position in display space
    pub pointer: Vec2,
    pub mapping: PointerMapping,
}

impl InputState {
    /// Read the keyboard and mouse. Call once per frame.
    pub fn sample(mapping: PointerMapping) -> Self {
        let (mx, my) = mouse_position();
        Self {
            up: action_down(Action::MoveUp),
            down: action_down(Action::MoveDown),
            left: action_down(Action::MoveLeft),
            right: action_down(Action::MoveRight),
            fire: action_down(Action::Fire),
            pointer: Vec2::new(mx, my),
            mapping,
        }
    }

    /// Movement direction, normalized so diagonals aren't faster.
    /// Screen coordinates: up is -y.
    pub fn move_intent(&self) -> Vec2 {
        let mut intent = Vec2::ZERO;
        if self.up {
            intent.y -= 1.0;
        }
        if self.down {
            intent.y += 1.0;
        }
        if self.left {
            intent.x -= 1.0;
        }
        if self.right {
            intent.x += 1.0;
        }
        intent.normalize_or_zero()
    }

    /// Pointer position in simulation space.
    pub fn pointer_world(&self) -> Vec2 {
        self.mapping.to_simulation(self.pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_intent_is_normalized() {
        let input = InputState {
            up: true,
            right: true,
            ..Default::default()
        };
        let intent = input.move_intent();
        assert_relative_eq!(intent.length(), 1.0, epsilon = 1e-6);
        assert!(intent.x > 0.0 && intent.y < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.move_intent(), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_mapping() {
        let input = InputState {
            pointer: Vec2::new(110.0, 60.0),
            mapping: PointerMapping::new(Vec2::new(10.0, 10.0), 2.0),
            ..Default::default()
        };
        assert_eq!(input.pointer_world(), Vec2::new(200.0, 100.0));
    }
}
