//! Shared fixture for unit tests: an empty world seen through a focused
//! 100×100 viewport with the default camera (eye at z = 10, looking at the
//! origin).

use ferrous_core::{Camera, Handle, ScreenRect, World};
use glam::{Vec2, Vec3};

use crate::config::EditorConfig;
use crate::context::{EditorContext, Modifiers};
use crate::picking::PickDebug;
use crate::viewport::Viewport;

pub(crate) struct Fixture {
    pub world: World,
    pub viewport: Viewport,
    pub config: EditorConfig,
    pub debug: PickDebug,
    pub modifiers: Modifiers,
}

impl Fixture {
    pub fn new() -> Self {
        let mut viewport = Viewport::new(
            "Viewport 1",
            ScreenRect::new(0.0, 0.0, 100.0, 100.0),
            Camera::default(),
        );
        viewport.set_focused(true);
        viewport.set_mouse_position(Vec2::new(50.0, 50.0));
        Self {
            world: World::new(),
            viewport,
            config: EditorConfig::default(),
            debug: PickDebug::default(),
            modifiers: Modifiers::default(),
        }
    }

    /// Unit cubes A, B, C at x = 0, 3, -3.  On screen A sits at the
    /// centre, B around x ≈ 86 and C around x ≈ 14.
    pub fn spawn_row(&mut self) -> [Handle; 3] {
        [
            self.world.spawn_cube("A", Vec3::ZERO),
            self.world.spawn_cube("B", Vec3::new(3.0, 0.0, 0.0)),
            self.world.spawn_cube("C", Vec3::new(-3.0, 0.0, 0.0)),
        ]
    }

    pub fn move_mouse(&mut self, x: f32, y: f32) {
        self.viewport.set_mouse_position(Vec2::new(x, y));
    }

    pub fn cx(&mut self) -> EditorContext<'_> {
        EditorContext {
            world: &mut self.world,
            viewport: Some(&mut self.viewport),
            modifiers: self.modifiers,
            config: &self.config,
            debug: &mut self.debug,
        }
    }

    /// Context as seen while another panel has focus.
    pub fn unfocused_cx(&mut self) -> EditorContext<'_> {
        EditorContext {
            world: &mut self.world,
            viewport: None,
            modifiers: self.modifiers,
            config: &self.config,
            debug: &mut self.debug,
        }
    }
}
