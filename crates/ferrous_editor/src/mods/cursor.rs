use std::collections::HashSet;

use super::{BaseMod, EditorMod, ModId};
use crate::context::EditorContext;
use crate::error::EditorError;
use crate::fsm::{State, StateMachine};
use crate::picking::{picking_machine, PickState, PickingPayload};
use crate::signal::SignalId;

/// Places the 3D cursor on whatever surface the user clicks.  Clicks into
/// empty space leave the cursor where it is.
pub struct CursorMod {
    base: BaseMod<PickState>,
}

impl CursorMod {
    pub fn new() -> Self {
        Self {
            base: BaseMod::new(ModId::Cursor, StateMachine::new(PickingPayload::default())),
        }
    }

    pub fn picking(&self) -> &StateMachine<PickState> {
        self.base.fsm()
    }
}

impl Default for CursorMod {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorMod for CursorMod {
    fn id(&self) -> ModId {
        self.base.id()
    }

    fn init(&mut self, _cx: &mut EditorContext<'_>) {
        *self.base.fsm_mut() = picking_machine(HashSet::new(), false);
    }

    fn update(&mut self, dt: f32, cx: &mut EditorContext<'_>) {
        self.base.update(dt, cx);

        if !self.base.fsm_mut().take_entered(PickState::EndPick) {
            return;
        }
        match self.base.fsm().payload().picks.last() {
            Some(pick) if pick.entity.is_some() => {
                cx.world.set_cursor_position(pick.position);
                log::debug!("cursor moved to {:?}", pick.position);
            }
            _ => {}
        }
    }

    fn signal(&mut self, signal: SignalId, cx: &mut EditorContext<'_>) -> Result<(), EditorError> {
        self.base.signal(signal, cx)
    }

    fn current_state(&self) -> Option<&'static str> {
        self.base.fsm().current().map(|s| s.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use glam::Vec3;

    fn click(cursor: &mut CursorMod, fx: &mut Fixture) {
        cursor.signal(SignalId::LEFT_MOUSE_BTN_DOWN, &mut fx.cx()).unwrap();
        cursor.signal(SignalId::LEFT_MOUSE_BTN_UP, &mut fx.cx()).unwrap();
        cursor.update(0.016, &mut fx.cx());
    }

    #[test]
    fn click_on_entity_moves_cursor_to_surface() {
        let mut fx = Fixture::new();
        fx.spawn_row();
        let mut cursor = CursorMod::new();
        cursor.init(&mut fx.cx());

        click(&mut cursor, &mut fx);

        // Ray from the centre of the screen meets A's front face at z = 0.5.
        let p = fx.world.cursor_position();
        assert!((p - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-3, "{p:?}");
        assert_eq!(cursor.current_state(), Some("EndPick"));
    }

    #[test]
    fn click_into_empty_space_keeps_cursor() {
        let mut fx = Fixture::new();
        fx.world.set_cursor_position(Vec3::new(1.0, 2.0, 3.0));
        let mut cursor = CursorMod::new();
        cursor.init(&mut fx.cx());

        click(&mut cursor, &mut fx);

        assert_eq!(fx.world.cursor_position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn drags_do_not_start_box_picks() {
        let mut fx = Fixture::new();
        let mut cursor = CursorMod::new();
        cursor.init(&mut fx.cx());
        assert!(!cursor.picking().is_registered(PickState::BeginBoxPick));

        cursor.signal(SignalId::LEFT_MOUSE_BTN_DOWN, &mut fx.cx()).unwrap();
        cursor.signal(SignalId::LEFT_MOUSE_BTN_DRAG, &mut fx.cx()).unwrap();
        assert_eq!(cursor.current_state(), Some("BeginPick"));
    }

    #[test]
    fn selection_is_untouched() {
        let mut fx = Fixture::new();
        let [_, b, _] = fx.spawn_row();
        fx.world.add_to_selection(b);
        let mut cursor = CursorMod::new();
        cursor.init(&mut fx.cx());

        click(&mut cursor, &mut fx);

        assert!(fx.world.is_selected(b));
        assert_eq!(fx.world.selection().len(), 1);
    }
}
