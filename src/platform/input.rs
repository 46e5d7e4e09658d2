//! Keyboard/pointer input mapping

use crate::sim::TickInput;

/// Game actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    /// Start or restart when not running
    Confirm,
    ToggleMute,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(KeyAction::Left),
            "ArrowRight" => Some(KeyAction::Right),
            "Enter" | " " => Some(KeyAction::Confirm),
            "m" | "M" => Some(KeyAction::ToggleMute),
            _ => None,
        }
    }
}

/// Held keys plus one-shot presses, sampled once per frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    start: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed; returns the action it mapped to
    pub fn key_down(&mut self, key: &str) -> Option<KeyAction> {
        let action = KeyAction::from_key(key)?;
        match action {
            KeyAction::Left => self.left = true,
            KeyAction::Right => self.right = true,
            KeyAction::Confirm => self.start = true,
            KeyAction::ToggleMute => {}
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &str) {
        match KeyAction::from_key(key) {
            Some(KeyAction::Left) => self.left = false,
            Some(KeyAction::Right) => self.right = false,
            _ => {}
        }
    }

    /// Click/tap on the play surface
    pub fn pointer_down(&mut self) {
        self.start = true;
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Build this frame's input and clear one-shot presses
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            start: self.start,
        };
        self.start = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key("ArrowLeft"), Some(KeyAction::Left));
        assert_eq!(KeyAction::from_key(" "), Some(KeyAction::Confirm));
        assert_eq!(KeyAction::from_key("Enter"), Some(KeyAction::Confirm));
        assert_eq!(KeyAction::from_key("x"), None);
    }

    #[test]
    fn test_held_keys_persist_until_release() {
        let mut input = InputState::new();
        input.key_down("ArrowRight");
        assert!(input.take_tick_input().right);
        assert!(input.take_tick_input().right);
        input.key_up("ArrowRight");
        assert!(!input.take_tick_input().right);
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut input = InputState::new();
        input.key_down("Enter");
        assert!(input.take_tick_input().start);
        assert!(!input.take_tick_input().start);

        input.pointer_down();
        assert!(input.take_tick_input().start);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        input.release_all();
        let tick = input.take_tick_input();
        assert!(!tick.left && !tick.right && !tick.start);
    }
}
