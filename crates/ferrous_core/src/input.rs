use std::collections::HashSet;

/// Re-exported key and mouse enums from `winit` for convenience.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// State of the keyboard and mouse at a given moment.
///
/// The host application drives this structure by feeding it the events
/// coming from `winit`.  Besides the held sets it keeps the press/release
/// *edges* of the current frame, which the editor turns into tool signals.
/// Call [`InputState::end_frame`] once every callback has read the frame.
#[derive(Default, Debug, Clone)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
    pressed_this_frame: HashSet<MouseButton>,
    released_this_frame: HashSet<MouseButton>,
    mouse_pos: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Default::default()
    }

    /// Called by the event loop when a keyboard event arrives.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Returns true if the given key is currently pressed down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Either shift key is held.
    pub fn shift_held(&self) -> bool {
        self.is_key_pressed(KeyCode::ShiftLeft) || self.is_key_pressed(KeyCode::ShiftRight)
    }

    /// Called by the event loop when a mouse button event arrives.
    ///
    /// Repeated presses of an already held button are not new edges.
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if self.mouse_buttons.insert(button) {
                self.pressed_this_frame.insert(button);
            }
        } else if self.mouse_buttons.remove(&button) {
            self.released_this_frame.insert(button);
        }
    }

    /// Returns true if the given mouse button is currently held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// The button went down during the current frame.
    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.pressed_this_frame.contains(&button)
    }

    /// The button went up during the current frame.
    pub fn just_released(&self, button: MouseButton) -> bool {
        self.released_this_frame.contains(&button)
    }

    /// Update the current mouse cursor position (window coordinates).
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_pos = (x, y);
    }

    /// Retrieve the last recorded mouse position.
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_pos
    }

    /// Forget this frame's edges.  Held keys and buttons stay held.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.shift_held());
        state.update_key(KeyCode::ShiftRight, true);
        assert!(state.shift_held());
        state.update_key(KeyCode::ShiftRight, false);
        assert!(!state.is_key_pressed(KeyCode::ShiftRight));
    }

    #[test]
    fn mouse_edges_last_one_frame() {
        let mut state = InputState::new();
        state.update_mouse_button(MouseButton::Left, true);
        assert!(state.is_button_down(MouseButton::Left));
        assert!(state.just_pressed(MouseButton::Left));
        state.end_frame();
        assert!(state.is_button_down(MouseButton::Left));
        assert!(!state.just_pressed(MouseButton::Left));

        // key repeat style duplicates are not a new press
        state.update_mouse_button(MouseButton::Left, true);
        assert!(!state.just_pressed(MouseButton::Left));

        state.update_mouse_button(MouseButton::Left, false);
        assert!(state.just_released(MouseButton::Left));
        state.end_frame();
        assert!(!state.just_released(MouseButton::Left));
    }

    #[test]
    fn mouse_position_survives_end_frame() {
        let mut state = InputState::new();
        state.set_mouse_position(10.0, 20.0);
        state.set_mouse_position(16.0, 25.0);
        state.end_frame();
        assert_eq!(state.mouse_position(), (16.0, 25.0));
    }
}
