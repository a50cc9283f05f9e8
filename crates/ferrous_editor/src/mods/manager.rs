use super::{BaseMod, CursorMod, EditorMod, ModId, SelectMod};
use crate::context::EditorContext;
use crate::error::EditorError;
use crate::signal::SignalId;

/// Stack of active tool modes.
///
/// The bottom slot is always the no-op Base mode and is never popped.  At
/// most one concrete mode sits on top of it; only that top mode receives
/// signals and updates.
pub struct ModManager {
    stack: Vec<Box<dyn EditorMod>>,
}

impl ModManager {
    pub fn new() -> Self {
        Self {
            stack: vec![Box::new(BaseMod::base())],
        }
    }

    /// Builds a fresh, uninitialised instance of `id`.
    fn create(id: ModId) -> Result<Box<dyn EditorMod>, EditorError> {
        match id {
            ModId::Base => Ok(Box::new(BaseMod::base())),
            ModId::Select => Ok(Box::new(SelectMod::new())),
            ModId::Cursor => Ok(Box::new(CursorMod::new())),
            ModId::Move | ModId::Rotate | ModId::Scale => Err(EditorError::UnimplementedMod(id)),
        }
    }

    pub fn init(&mut self, cx: &mut EditorContext<'_>) {
        for m in &mut self.stack {
            m.init(cx);
        }
        log::info!("mode manager ready, active mode {}", self.active());
    }

    /// Uninitialises every mode and drops everything above Base.
    pub fn uninit(&mut self, cx: &mut EditorContext<'_>) {
        for m in self.stack.iter_mut().rev() {
            m.uninit(cx);
        }
        self.stack.truncate(1);
    }

    /// Enables or disables a mode.
    ///
    /// Enabling replaces the current concrete mode with a fresh instance of
    /// `id`, abandoning whatever it was doing.  Enabling `Base` simply
    /// returns to Base.  Disabling pops the top mode when it is `id`.
    ///
    /// Asking for an unimplemented mode panics in debug builds.  Release
    /// builds leave the stack untouched and return
    /// [`EditorError::UnimplementedMod`].
    pub fn set_mod(
        &mut self,
        enable: bool,
        id: ModId,
        cx: &mut EditorContext<'_>,
    ) -> Result<(), EditorError> {
        if !enable {
            if id != ModId::Base && self.active() == id {
                self.pop_to_base(cx);
                log::info!("mode {id} disabled");
            }
            return Ok(());
        }

        if id == ModId::Base {
            self.pop_to_base(cx);
            return Ok(());
        }

        let mut next = Self::create(id).map_err(|e| {
            log::error!("set_mod({id}): {e}");
            if cfg!(debug_assertions) {
                panic!("{e}");
            }
            e
        })?;
        self.pop_to_base(cx);
        next.init(cx);
        self.stack.push(next);
        log::info!("mode {id} enabled");
        Ok(())
    }

    fn pop_to_base(&mut self, cx: &mut EditorContext<'_>) {
        while self.stack.len() > 1 {
            if let Some(mut m) = self.stack.pop() {
                log::debug!("dropping mode {} in state {:?}", m.id(), m.current_state());
                m.uninit(cx);
            }
        }
    }

    fn top(&mut self) -> &mut dyn EditorMod {
        let last = self.stack.len() - 1;
        self.stack[last].as_mut()
    }

    pub fn update(&mut self, dt: f32, cx: &mut EditorContext<'_>) {
        self.top().update(dt, cx);
    }

    pub fn dispatch_signal(
        &mut self,
        signal: SignalId,
        cx: &mut EditorContext<'_>,
    ) -> Result<(), EditorError> {
        self.top().signal(signal, cx)
    }

    pub fn active(&self) -> ModId {
        self.stack.last().map_or(ModId::Base, |m| m.id())
    }

    pub fn current_state(&self) -> Option<&'static str> {
        self.stack.last().and_then(|m| m.current_state())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for ModManager {
    fn default() -> Self {
        Self::new()
    }
}
