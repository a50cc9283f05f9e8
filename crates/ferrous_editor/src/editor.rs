use ferrous_core::{ElementKind, Handle, InputState, MouseButton, World};
use glam::Vec2;

use crate::config::EditorConfig;
use crate::context::{EditorContext, Modifiers};
use crate::error::EditorError;
use crate::mods::{ModId, ModManager};
use crate::picking::PickDebug;
use crate::signal::SignalRouter;
use crate::viewport::Viewport;
use crate::EDITOR_TAG;

/// One editing session: the scene, its viewports and the tool modes acting
/// on them.
///
/// The host calls [`Editor::frame`] once per rendered frame after feeding
/// the window events into its [`InputState`], and `InputState::end_frame`
/// afterwards.
pub struct Editor {
    world: World,
    viewports: Vec<Viewport>,
    /// Index of the focused viewport, the only source of pick signals.
    active: Option<usize>,
    mods: ModManager,
    router: SignalRouter,
    config: EditorConfig,
    pick_debug: PickDebug,
    grid: Handle,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let mut world = World::new();
        let grid = world
            .spawn("Grid")
            .with_kind(ElementKind::Grid {
                half_size: config.grid_half_size,
            })
            .with_tag(EDITOR_TAG)
            .build();

        Self {
            world,
            viewports: Vec::new(),
            active: None,
            mods: ModManager::new(),
            router: SignalRouter::new(config.drag_threshold),
            config,
            pick_debug: PickDebug::default(),
            grid,
        }
    }

    /// Splits the borrow of `self` into the mode manager and the context
    /// its modes operate on.
    fn split(&mut self, modifiers: Modifiers) -> (&mut ModManager, EditorContext<'_>) {
        let viewport = match self.active {
            Some(i) => self.viewports.get_mut(i),
            None => None,
        };
        let cx = EditorContext {
            world: &mut self.world,
            viewport,
            modifiers,
            config: &self.config,
            debug: &mut self.pick_debug,
        };
        (&mut self.mods, cx)
    }

    /// Scene load: initialise the mode stack and enable the configured
    /// start mode.
    pub fn init(&mut self) -> Result<(), EditorError> {
        let initial = self.config.initial_mod;
        let (mods, mut cx) = self.split(Modifiers::default());
        mods.init(&mut cx);
        mods.set_mod(true, initial, &mut cx)
    }

    /// Scene unload.
    pub fn uninit(&mut self) {
        let (mods, mut cx) = self.split(Modifiers::default());
        mods.uninit(&mut cx);
        self.router.reset();
    }

    pub fn set_mod(&mut self, enable: bool, id: ModId) -> Result<(), EditorError> {
        let (mods, mut cx) = self.split(Modifiers::default());
        mods.set_mod(enable, id, &mut cx)
    }

    pub fn add_viewport(&mut self, viewport: Viewport) -> usize {
        log::debug!("viewport {} at {:?}", viewport.name, viewport.rect);
        self.viewports.push(viewport);
        self.viewports.len() - 1
    }

    /// Gives focus to viewport `index`, or to none.  Out of range indices
    /// clear the focus.
    pub fn set_active_viewport(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.viewports.len());
        if index != self.active {
            self.router.reset();
        }
        for (i, vp) in self.viewports.iter_mut().enumerate() {
            vp.set_focused(Some(i) == index);
        }
        self.active = index;
    }

    /// Runs one frame: focus handling, signal dispatch, then mode update.
    pub fn frame(&mut self, input: &InputState, dt: f32) {
        for vp in &mut self.viewports {
            vp.clear_overlay();
        }

        let (mx, my) = input.mouse_position();
        let mouse = Vec2::new(mx as f32, my as f32);

        if input.just_pressed(MouseButton::Left) || input.just_pressed(MouseButton::Right) {
            let under_mouse = self.viewports.iter().position(|vp| vp.hit(mouse));
            self.set_active_viewport(under_mouse);
        }

        let signals = match self.active {
            Some(i) => {
                self.viewports[i].set_mouse_position(mouse);
                self.router.poll(input)
            }
            None => {
                self.router.reset();
                Vec::new()
            }
        };

        let (mods, mut cx) = self.split(Modifiers::from_input(input));
        for signal in signals {
            if let Err(e) = mods.dispatch_signal(signal, &mut cx) {
                log::error!("{signal} dropped: {e}");
            }
        }
        mods.update(dt, &mut cx);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The editor ground grid, never selectable.
    pub fn grid(&self) -> Handle {
        self.grid
    }

    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    pub fn viewport_mut(&mut self, index: usize) -> Option<&mut Viewport> {
        self.viewports.get_mut(index)
    }

    pub fn active_viewport(&self) -> Option<&Viewport> {
        self.active.and_then(|i| self.viewports.get(i))
    }

    pub fn active_mod(&self) -> ModId {
        self.mods.active()
    }

    pub fn mods(&self) -> &ModManager {
        &self.mods
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pick_debug(&self) -> &PickDebug {
        &self.pick_debug
    }
}
