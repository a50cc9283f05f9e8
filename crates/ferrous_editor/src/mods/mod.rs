//! Tool modes.
//!
//! | Module     | Responsibility                                          |
//! |------------|---------------------------------------------------------|
//! | `mod.rs`   | `ModId`, the `EditorMod` contract, generic `BaseMod`    |
//! | `select`   | `SelectMod` and the selection policy                    |
//! | `cursor`   | `CursorMod`, places the 3D cursor                       |
//! | `manager`  | `ModManager`, the stack of active modes                 |

pub mod cursor;
pub mod manager;
pub mod select;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::EditorContext;
use crate::error::EditorError;
use crate::fsm::{State, StateMachine};
use crate::signal::SignalId;

pub use cursor::CursorMod;
pub use manager::ModManager;
pub use select::{apply_selection, SelectMod};

/// Every mode the toolbar can ask for.  Move, Rotate and Scale are
/// declared but have no implementation yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModId {
    Base,
    Select,
    Cursor,
    Move,
    Rotate,
    Scale,
}

impl ModId {
    pub const ALL: [ModId; 6] = [
        ModId::Base,
        ModId::Select,
        ModId::Cursor,
        ModId::Move,
        ModId::Rotate,
        ModId::Scale,
    ];

    /// `false` for the declared but not yet built transform modes.
    pub fn is_implemented(self) -> bool {
        matches!(self, ModId::Base | ModId::Select | ModId::Cursor)
    }
}

impl fmt::Display for ModId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Uniform contract of a tool mode.
///
/// A mode is created by [`ModManager::set_mod`], receives `init` before
/// its first signal and `uninit` before it is dropped.
#[allow(unused_variables)]
pub trait EditorMod {
    fn id(&self) -> ModId;

    /// Build the state machine.
    fn init(&mut self, cx: &mut EditorContext<'_>) {}

    fn uninit(&mut self, cx: &mut EditorContext<'_>) {}

    fn update(&mut self, dt: f32, cx: &mut EditorContext<'_>);

    fn signal(&mut self, signal: SignalId, cx: &mut EditorContext<'_>) -> Result<(), EditorError>;

    /// Name of the current state, for logs and the status bar.
    fn current_state(&self) -> Option<&'static str>;
}

/// A mode id plus the one state machine it owns.  Concrete modes wrap a
/// `BaseMod` and add their post-processing in `update`.
pub struct BaseMod<S: State> {
    id: ModId,
    fsm: StateMachine<S>,
}

impl<S: State> BaseMod<S> {
    pub fn new(id: ModId, fsm: StateMachine<S>) -> Self {
        Self { id, fsm }
    }

    pub fn id(&self) -> ModId {
        self.id
    }

    pub fn fsm(&self) -> &StateMachine<S> {
        &self.fsm
    }

    pub fn fsm_mut(&mut self) -> &mut StateMachine<S> {
        &mut self.fsm
    }

    pub fn update(&mut self, dt: f32, cx: &mut EditorContext<'_>) {
        self.fsm.update(dt, cx);
    }

    pub fn signal(
        &mut self,
        signal: SignalId,
        cx: &mut EditorContext<'_>,
    ) -> Result<(), EditorError> {
        self.fsm.signal(signal, cx).map(|_| ())
    }

    pub fn current_state(&self) -> Option<&'static str> {
        self.fsm.current().map(|s| s.name())
    }
}

/// The only state of the Base mode: ignores every signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseState {
    Idle,
}

impl State for BaseState {
    type Payload = ();

    fn name(&self) -> &'static str {
        "Idle"
    }

    fn signaled(&self, _: SignalId, _: &mut (), _: &mut EditorContext<'_>) -> Option<Self> {
        None
    }
}

impl BaseMod<BaseState> {
    /// The no-op mode at the bottom of the mode stack.
    pub fn base() -> Self {
        let mut fsm = StateMachine::new(());
        fsm.register_state(BaseState::Idle);
        Self::new(ModId::Base, fsm)
    }
}

impl EditorMod for BaseMod<BaseState> {
    fn id(&self) -> ModId {
        self.id
    }

    fn update(&mut self, dt: f32, cx: &mut EditorContext<'_>) {
        BaseMod::update(self, dt, cx);
    }

    fn signal(&mut self, signal: SignalId, cx: &mut EditorContext<'_>) -> Result<(), EditorError> {
        BaseMod::signal(self, signal, cx)
    }

    fn current_state(&self) -> Option<&'static str> {
        BaseMod::current_state(self)
    }
}
