//! Game action definitions
//!
//! Keyboard layout:
//! - WASD / arrow keys = Move
//! - Left mouse / Space = Fire
//! - Escape / P = Pause
//! - R / Enter = Restart (game over screen)

use macroquad::prelude::*;

/// All actions the host reads from the keyboard and mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Combat
    Fire,

    // System
    Pause,
    Restart,
}

impl Action {
    /// Keys bound to this action
    pub fn keys(self) -> &'static [KeyCode] {
        match self {
            Action::MoveUp => &[KeyCode::W, KeyCode::Up],
            Action::MoveDown => &[KeyCode::S, KeyCode::Down],
            Action::MoveLeft => &[KeyCode::A, KeyCode::Left],
            Action::MoveRight => &[KeyCode::D, KeyCode::Right],
            Action::Fire => &[KeyCode::Space],
            Action::Pause => &[KeyCode::Escape, KeyCode::P],
            Action::Restart => &[KeyCode::R, KeyCode::Enter],
        }
    }

    /// Mouse button bound to this action, if any
    pub fn mouse_button(self) -> Option<MouseButton> {
        match self {
            Action::Fire => Some(MouseButton::Left),
            _ => None,
        }
    }
}

/// Check if action is currently held down
pub fn action_down(action: Action) -> bool {
    action.keys().iter().any(|&key| is_key_down(key))
        || action.mouse_button().is_some_and(is_mouse_button_down)
}

/// Check if action was just pressed this frame
pub fn action_pressed(action: Action) -> bool {
    action.keys().iter().any(|&key| is_key_pressed(key))
        || action.mouse_button().is_some_and(is_mouse_button_pressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_is_bound() {
        for action in [
            Action::MoveUp,
            Action::MoveDown,
            Action::MoveLeft,
            Action::MoveRight,
            Action::Fire,
            Action::Pause,
            Action::Restart,
        ] {
            assert!(!action.keys().is_empty() || action.mouse_button().is_some());
        }
    }

    #[test]
    fn test_fire_uses_left_mouse() {
        assert_eq!(Action::Fire.mouse_button(), Some(MouseButton::Left));
        assert_eq!(Action::Pause.mouse_button(), None);
    }
}
