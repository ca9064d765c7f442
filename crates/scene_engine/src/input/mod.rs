//! Input state tracking
//!
//! The host feeds raw events into [`InputState`]; the engine reads the current and
//! previous tick's state to detect press/release edges. The state is advanced with
//! [`InputState::end_frame`] once per tick, after everything has read it.

use std::collections::HashSet;

use bitflags::bitflags;

use crate::foundation::math::Vec2;

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

bitflags! {
    /// Set of mouse buttons held down during a tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left mouse button
        const LEFT = 1 << 0;
        /// Right mouse button
        const RIGHT = 1 << 1;
        /// Middle mouse button
        const MIDDLE = 1 << 2;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Raw input event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a window-space position
    PointerMoved {
        /// New X coordinate
        x: f32,
        /// New Y coordinate
        y: f32,
    },
    /// Mouse button changed state
    MouseButton {
        /// The mouse button that was pressed/released
        button: MouseButton,
        /// Whether the button was pressed (true) or released (false)
        pressed: bool,
    },
    /// Key changed state
    Key {
        /// The key that was pressed/released
        key: KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },
}

/// Current and previous tick's pointer, button and key state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Vec2,
    previous_pointer: Vec2,
    buttons: MouseButtons,
    previous_buttons: MouseButtons,
    keys: HashSet<KeyCode>,
    previous_keys: HashSet<KeyCode>,
}

impl InputState {
    /// Create an input state with the pointer at the origin and nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a raw event to the current tick's state
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.set_pointer(Vec2::new(x, y)),
            InputEvent::MouseButton { button, pressed } => self.set_button(button, pressed),
            InputEvent::Key { key, pressed } => self.set_key(key, pressed),
        }
    }

    /// Update pointer position (window space)
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// Update mouse button state
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons.set(button.into(), pressed);
    }

    /// Update key state
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    /// Finish the tick: the current state becomes the previous state
    pub fn end_frame(&mut self) {
        self.previous_pointer = self.pointer;
        self.previous_buttons = self.buttons;
        self.previous_keys.clone_from(&self.keys);
    }

    /// Pointer position in window space
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer movement since the previous tick
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.previous_pointer
    }

    /// Buttons held this tick
    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Whether a button is held this tick
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(button.into())
    }

    /// Whether a button went down this tick
    pub fn was_button_pressed(&self, button: MouseButton) -> bool {
        let flag = MouseButtons::from(button);
        self.buttons.contains(flag) && !self.previous_buttons.contains(flag)
    }

    /// Whether a button came up this tick
    pub fn was_button_released(&self, button: MouseButton) -> bool {
        let flag = MouseButtons::from(button);
        !self.buttons.contains(flag) && self.previous_buttons.contains(flag)
    }

    /// Whether a key is held this tick
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether a key went down this tick
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    /// Whether a key came up this tick
    pub fn was_key_released(&self, key: KeyCode) -> bool {
        !self.keys.contains(&key) && self.previous_keys.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges_last_one_tick() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::MouseButton { button: MouseButton::Left, pressed: true });

        assert!(input.is_button_down(MouseButton::Left));
        assert!(input.was_button_pressed(MouseButton::Left));
        assert!(!input.was_button_released(MouseButton::Left));

        input.end_frame();
        assert!(input.is_button_down(MouseButton::Left));
        assert!(!input.was_button_pressed(MouseButton::Left));

        input.set_button(MouseButton::Left, false);
        assert!(input.was_button_released(MouseButton::Left));
        assert!(!input.was_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_key_edges() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::Key { key: KeyCode::Space, pressed: true });
        assert!(input.was_key_pressed(KeyCode::Space));

        input.end_frame();
        input.handle_event(InputEvent::Key { key: KeyCode::Space, pressed: false });
        assert!(input.was_key_released(KeyCode::Space));
        assert!(!input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn test_pointer_delta() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::PointerMoved { x: 10.0, y: 5.0 });
        input.end_frame();
        input.set_pointer(Vec2::new(12.0, 1.0));

        assert_eq!(input.pointer(), Vec2::new(12.0, 1.0));
        assert_eq!(input.pointer_delta(), Vec2::new(2.0, -4.0));
    }
}
