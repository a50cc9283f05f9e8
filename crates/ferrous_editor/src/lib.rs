//! Editor tool modes for FerrousEngine.
//!
//! Raw per-frame input is turned into signals, signals drive the state
//! machine of the active tool mode, and completed pick cycles become scene
//! edits (selection, 3D cursor placement).
//!
//! | Module      | Responsibility                                        |
//! |-------------|-------------------------------------------------------|
//! | `signal`    | `SignalId`, click / drag detection                    |
//! | `fsm`       | generic `State` / `StateMachine`                      |
//! | `picking`   | BeginPick / BeginBoxPick / EndPick machine            |
//! | `mods`      | tool modes and the `ModManager` stack                 |
//! | `viewport`  | focus, pick rays, overlay commands                    |
//! | `context`   | `EditorContext` handed to every callback              |
//! | `editor`    | `Editor`, one session driven frame by frame           |
//! | `config`    | `EditorConfig` (TOML)                                 |
//! | `logging`   | `fern` logger setup                                   |
//! | `error`     | `EditorError`                                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ferrous_editor::{Editor, EditorConfig, Viewport};
//!
//! let mut editor = Editor::new(EditorConfig::default());
//! editor.add_viewport(Viewport::new("Viewport 1", rect, Camera::default()));
//! editor.init()?;
//!
//! // every frame, after feeding window events into `input`:
//! editor.frame(&input, dt);
//! input.end_frame();
//! ```

pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod fsm;
pub mod logging;
pub mod mods;
pub mod picking;
pub mod signal;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use config::{EditorConfig, SelectionRectStyle};
pub use context::{EditorContext, Modifiers};
pub use editor::Editor;
pub use error::EditorError;
pub use fsm::{State, StateMachine, Transition};
pub use mods::{apply_selection, CursorMod, EditorMod, ModId, ModManager, SelectMod};
pub use picking::{PickData, PickDebug, PickState, PickingPayload};
pub use signal::{SignalId, SignalRouter};
pub use viewport::{OverlayCommand, Viewport};

/// Tag carried by editor infrastructure entities (the ground grid, gizmos).
/// Select mode never picks them.
pub const EDITOR_TAG: &str = "editor";
