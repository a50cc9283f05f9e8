//! Picking state machine shared by the Select and Cursor modes.
//!
//! ```text
//!              drag (box picking only)
//!  BeginPick ───────────────────────────▶ BeginBoxPick
//!     │  ▲ ◀────────────── down ──────────────┤
//!     │  │                                     │
//!  up │  │ down (viewport queriable)        up │
//!     ▼  │                                     │
//!   EndPick ◀──────────────────────────────────┘
//! ```
//!
//! A press arriving in `BeginBoxPick` means the release of the previous
//! drag was lost; the box is dropped and a new cycle starts at `BeginPick`.
//!
//! A *pick cycle* ends when `EndPick` is entered; its results stay in
//! [`PickingPayload::picks`] until the next cycle starts.  The two mouse
//! anchors survive across cycles.

use std::collections::HashSet;

use ferrous_core::{Handle, PickHit, Ray, ScreenRect};
use glam::{Vec2, Vec3};

use crate::context::EditorContext;
use crate::fsm::{State, StateMachine};
use crate::signal::SignalId;
use crate::viewport::OverlayCommand;

/// Result of one pick: the entity hit, if any, and the world-space point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickData {
    pub entity: Option<Handle>,
    pub position: Vec3,
}

impl PickData {
    /// A miss keeps the ray origin as its position.
    fn from_ray_hit(hit: Option<PickHit>, ray: &Ray) -> Self {
        match hit {
            Some(hit) => Self {
                entity: Some(hit.handle),
                position: hit.point,
            },
            None => Self {
                entity: None,
                position: ray.origin,
            },
        }
    }
}

impl From<PickHit> for PickData {
    fn from(hit: PickHit) -> Self {
        Self {
            entity: Some(hit.handle),
            position: hit.point,
        }
    }
}

/// Last click pick, kept for visualisation while `picking_debug` is on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PickDebug {
    pub last_ray: Option<Ray>,
    /// Where the last ray hit something; `None` after a miss.
    pub hit_marker: Option<Vec3>,
}

/// Data shared by the picking states.
#[derive(Debug, Clone, Default)]
pub struct PickingPayload {
    /// `[0]` press / release anchor, `[1]` opposite corner of the box.
    pub mouse: [Vec2; 2],
    /// Results of the current cycle.
    pub picks: Vec<PickData>,
    /// Entities that are never picked.
    pub ignore: HashSet<Handle>,
    /// Drags turn into box picks; otherwise they are ignored.
    pub box_pick: bool,
}

impl PickingPayload {
    /// Rectangle spanned by the two anchors.
    pub fn selection_rect(&self) -> ScreenRect {
        ScreenRect::from_corners(self.mouse[0], self.mouse[1])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickState {
    BeginPick,
    BeginBoxPick,
    EndPick,
}

/// Builds the picking machine, `BeginPick` current.
///
/// Without `box_pick` the `BeginBoxPick` state is not registered.
pub fn picking_machine(ignore: HashSet<Handle>, box_pick: bool) -> StateMachine<PickState> {
    let mut fsm = StateMachine::new(PickingPayload {
        ignore,
        box_pick,
        ..Default::default()
    });
    fsm.register_state(PickState::BeginPick);
    if box_pick {
        fsm.register_state(PickState::BeginBoxPick);
    }
    fsm.register_state(PickState::EndPick);
    fsm
}

impl State for PickState {
    type Payload = PickingPayload;

    fn name(&self) -> &'static str {
        match self {
            PickState::BeginPick => "BeginPick",
            PickState::BeginBoxPick => "BeginBoxPick",
            PickState::EndPick => "EndPick",
        }
    }

    fn signaled(
        &self,
        signal: SignalId,
        payload: &mut PickingPayload,
        cx: &mut EditorContext<'_>,
    ) -> Option<Self> {
        match self {
            PickState::BeginPick => begin_pick(signal, payload, cx),
            PickState::BeginBoxPick => begin_box_pick(signal, payload, cx),
            PickState::EndPick => end_pick(signal, payload, cx),
        }
    }

    fn transition_out(&self, _next: Self, payload: &mut PickingPayload) {
        if *self == PickState::EndPick {
            payload.picks.clear();
        }
    }
}

/// Moves the far corner of the box to the pointer and draws the rectangle.
fn track_box(payload: &mut PickingPayload, cx: &mut EditorContext<'_>) {
    if let Some(vp) = cx.viewport.as_deref_mut() {
        payload.mouse[1] = vp.last_mouse_pos_screen_space();
        vp.push_overlay(OverlayCommand::SelectionRect {
            rect: payload.selection_rect(),
            style: cx.config.selection_rect,
        });
    }
}

fn begin_pick(
    signal: SignalId,
    payload: &mut PickingPayload,
    cx: &mut EditorContext<'_>,
) -> Option<PickState> {
    match signal {
        SignalId::LEFT_MOUSE_BTN_DOWN => {
            if let Some(vp) = cx.viewport.as_deref() {
                payload.mouse[0] = vp.last_mouse_pos_screen_space();
            }
            None
        }
        SignalId::LEFT_MOUSE_BTN_DRAG if payload.box_pick => {
            payload.mouse[1] = payload.mouse[0];
            track_box(payload, cx);
            Some(PickState::BeginBoxPick)
        }
        SignalId::LEFT_MOUSE_BTN_UP => {
            let vp = cx.viewport.as_deref()?;
            payload.mouse[0] = vp.last_mouse_pos_screen_space();

            let ray = vp.ray_from_mouse_position();
            let hit = cx.world.pick_along_ray(&ray, &payload.ignore);
            log::debug!("click pick at {:?}: {:?}", payload.mouse[0], hit);

            if cx.config.picking_debug {
                cx.debug.last_ray = Some(ray);
                cx.debug.hit_marker = hit.map(|h| h.point);
                log::debug!(
                    "pick ray {:?} -> {:?}, marker {:?}",
                    ray.origin,
                    ray.direction,
                    cx.debug.hit_marker
                );
            }

            payload.picks.push(PickData::from_ray_hit(hit, &ray));
            Some(PickState::EndPick)
        }
        _ => None,
    }
}

fn begin_box_pick(
    signal: SignalId,
    payload: &mut PickingPayload,
    cx: &mut EditorContext<'_>,
) -> Option<PickState> {
    match signal {
        // The release of this drag was never seen (focus moved away while
        // the button was held): drop the box and start over from here.
        SignalId::LEFT_MOUSE_BTN_DOWN => {
            log::debug!("box pick abandoned at {:?}", payload.mouse);
            if let Some(vp) = cx.viewport.as_deref() {
                payload.mouse[0] = vp.last_mouse_pos_screen_space();
            }
            Some(PickState::BeginPick)
        }
        SignalId::LEFT_MOUSE_BTN_DRAG => {
            track_box(payload, cx);
            None
        }
        SignalId::LEFT_MOUSE_BTN_UP => {
            match cx.viewport.as_deref() {
                Some(vp) => {
                    payload.mouse[1] = vp.last_mouse_pos_screen_space();
                    let rect = payload.selection_rect();
                    let hits =
                        cx.world
                            .pick_in_rectangle(&rect, &vp.camera, &vp.rect, &payload.ignore);
                    log::debug!("box pick {:?}: {} entities", rect, hits.len());
                    payload.picks.extend(hits.into_iter().map(PickData::from));
                }
                None => log::warn!("box pick released without a focused viewport"),
            }
            Some(PickState::EndPick)
        }
        _ => None,
    }
}

fn end_pick(
    signal: SignalId,
    payload: &mut PickingPayload,
    cx: &mut EditorContext<'_>,
) -> Option<PickState> {
    if signal != SignalId::LEFT_MOUSE_BTN_DOWN {
        return None;
    }
    let vp = cx.viewport.as_deref()?;
    if !vp.is_queriable() {
        return None;
    }
    payload.mouse[0] = vp.last_mouse_pos_screen_space();
    Some(PickState::BeginPick)
}
