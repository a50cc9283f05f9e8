//! Signals: the discrete input tokens tool modes react to.
//!
//! Raw input is polled once per frame by [`SignalRouter::poll`], which turns
//! button edges and held-button movement into at most one signal of each
//! kind.  Modes never look at the raw [`InputState`] for pointer gestures.

use std::fmt;

use ferrous_core::{InputState, MouseButton};
use glam::Vec2;

/// Stable identifier of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalId(pub u32);

impl SignalId {
    pub const LEFT_MOUSE_BTN_DOWN: SignalId = SignalId(1);
    pub const LEFT_MOUSE_BTN_UP: SignalId = SignalId(2);
    pub const LEFT_MOUSE_BTN_DRAG: SignalId = SignalId(3);

    pub fn name(self) -> &'static str {
        match self {
            Self::LEFT_MOUSE_BTN_DOWN => "LeftMouseBtnDown",
            Self::LEFT_MOUSE_BTN_UP => "LeftMouseBtnUp",
            Self::LEFT_MOUSE_BTN_DRAG => "LeftMouseBtnDrag",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

/// Converts per-frame left-button input into signals.
///
/// Order within a frame is always down → drag → up.  Drag is emitted every
/// frame the button stays held once the pointer has left a disc of
/// `drag_threshold` pixels around the press point; small jitter during a
/// click therefore never turns it into a box pick.
#[derive(Debug, Clone)]
pub struct SignalRouter {
    drag_threshold: f32,
    press_origin: Option<Vec2>,
    dragging: bool,
}

impl SignalRouter {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            drag_threshold,
            press_origin: None,
            dragging: false,
        }
    }

    /// Forget any half-finished gesture.
    pub fn reset(&mut self) {
        self.press_origin = None;
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn poll(&mut self, input: &InputState) -> Vec<SignalId> {
        let (mx, my) = input.mouse_position();
        let mouse = Vec2::new(mx as f32, my as f32);
        let mut signals = Vec::with_capacity(2);

        if input.just_pressed(MouseButton::Left) {
            self.press_origin = Some(mouse);
            self.dragging = false;
            signals.push(SignalId::LEFT_MOUSE_BTN_DOWN);
        }

        if input.is_button_down(MouseButton::Left) {
            if let Some(origin) = self.press_origin {
                if !self.dragging && origin.distance(mouse) > self.drag_threshold {
                    self.dragging = true;
                }
                if self.dragging {
                    signals.push(SignalId::LEFT_MOUSE_BTN_DRAG);
                }
            }
        }

        if input.just_released(MouseButton::Left) {
            self.reset();
            signals.push(SignalId::LEFT_MOUSE_BTN_UP);
        }

        signals
    }
}
