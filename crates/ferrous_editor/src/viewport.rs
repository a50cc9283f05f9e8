use ferrous_core::{Camera, Ray, ScreenRect};
use glam::Vec2;

use crate::config::SelectionRectStyle;

/// 2-D draw request produced by a tool and drawn on top of the viewport by
/// the rendering side.  The list is rebuilt every frame.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    SelectionRect {
        rect: ScreenRect,
        style: SelectionRectStyle,
    },
}

/// A rectangular region of the window showing the scene through a camera.
///
/// The viewport does not render anything itself; it is the source of pick
/// signals while focused, knows how to turn the mouse position into a pick
/// ray, and collects overlay commands for the renderer.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub name: String,
    pub rect: ScreenRect,
    pub camera: Camera,
    focused: bool,
    last_mouse: Vec2,
    overlay: Vec<OverlayCommand>,
}

impl Viewport {
    pub fn new(name: impl Into<String>, rect: ScreenRect, camera: Camera) -> Self {
        let mut vp = Self {
            name: name.into(),
            rect,
            camera,
            focused: false,
            last_mouse: Vec2::ZERO,
            overlay: Vec::new(),
        };
        vp.resize(rect);
        vp
    }

    /// Moves or resizes the viewport and keeps the camera aspect in sync.
    pub fn resize(&mut self, rect: ScreenRect) {
        self.rect = rect;
        if rect.height() > 0.0 {
            self.camera.set_aspect(rect.width() / rect.height());
        }
    }

    pub fn hit(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Focused, visible, and the pointer is over it.
    pub fn is_queriable(&self) -> bool {
        self.focused && !self.rect.is_empty() && self.hit(self.last_mouse)
    }

    pub fn set_mouse_position(&mut self, pos: Vec2) {
        self.last_mouse = pos;
    }

    /// Last mouse position in window pixels.
    pub fn last_mouse_pos_screen_space(&self) -> Vec2 {
        self.last_mouse
    }

    pub fn ray_from_mouse_position(&self) -> Ray {
        self.camera.ray_from_screen(self.last_mouse, &self.rect)
    }

    pub fn push_overlay(&mut self, cmd: OverlayCommand) {
        self.overlay.push(cmd);
    }

    pub fn overlay(&self) -> &[OverlayCommand] {
        &self.overlay
    }

    /// Hands this frame's overlay commands to the renderer.
    pub fn take_overlay(&mut self) -> Vec<OverlayCommand> {
        std::mem::take(&mut self.overlay)
    }

    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn square_viewport() -> Viewport {
        Viewport::new("vp", ScreenRect::new(0.0, 0.0, 100.0, 100.0), Camera::default())
    }

    #[test]
    fn queriable_needs_focus_and_hover() {
        let mut vp = Viewport::new("vp", ScreenRect::new(0.0, 0.0, 100.0, 50.0), Camera::default());
        vp.set_mouse_position(Vec2::new(10.0, 10.0));
        assert!(!vp.is_queriable());
        vp.set_focused(true);
        assert!(vp.is_queriable());
        vp.set_mouse_position(Vec2::new(200.0, 10.0));
        assert!(!vp.is_queriable());
    }

    #[test]
    fn resize_updates_aspect() {
        let mut vp = square_viewport();
        assert_eq!(vp.camera.aspect, 1.0);
        vp.resize(ScreenRect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(vp.camera.aspect, 2.0);
    }

    #[test]
    fn mouse_ray_goes_through_pointer() {
        let mut vp = square_viewport();
        vp.set_mouse_position(Vec2::new(50.0, 50.0));
        let ray = vp.ray_from_mouse_position();
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn overlay_is_handed_over_once() {
        let mut vp = Viewport::new("vp", ScreenRect::new(0.0, 0.0, 10.0, 10.0), Camera::default());
        vp.push_overlay(OverlayCommand::SelectionRect {
            rect: ScreenRect::new(1.0, 1.0, 2.0, 2.0),
            style: SelectionRectStyle::default(),
        });
        assert_eq!(vp.take_overlay().len(), 1);
        assert!(vp.overlay().is_empty());
    }
}
