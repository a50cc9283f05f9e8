use ferrous_core::{InputState, World};

use crate::config::EditorConfig;
use crate::picking::PickDebug;
use crate::viewport::Viewport;

/// Modifier keys that change how a completed pick is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift held: toggle entities in and out of the selection instead of
    /// replacing it.
    pub additive: bool,
}

impl Modifiers {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            additive: input.shift_held(),
        }
    }
}

/// Per-frame context handed to every mode and state callback.
///
/// Bundles the scene, the focused viewport and the frame's modifier keys so
/// state machines never reach for global editor state:
///
/// ```rust,ignore
/// fn signaled(&self, signal: SignalId, payload: &mut Payload, cx: &mut EditorContext) -> Option<Self> {
///     let vp = cx.viewport.as_deref_mut()?;
///     let hit = cx.world.pick_along_ray(&vp.ray_from_mouse_position(), &payload.ignore);
///     ...
/// }
/// ```
pub struct EditorContext<'a> {
    /// The scene, including selection set and 3D cursor.
    pub world: &'a mut World,

    /// The focused viewport, `None` when input goes to some other panel.
    pub viewport: Option<&'a mut Viewport>,

    pub modifiers: Modifiers,

    pub config: &'a EditorConfig,

    /// Written by click picks while `config.picking_debug` is on.
    pub debug: &'a mut PickDebug,
}
