use thiserror::Error;

use crate::mods::ModId;

/// Wiring and configuration failures raised by the editor core.
///
/// None of these are caused by user input; an `UnimplementedMod` or
/// `UnregisteredState` means the tool setup itself is wrong.  Both leave the
/// mode stack and the state machine exactly as they were.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("mode {0} has no implementation")]
    UnimplementedMod(ModId),
    #[error("transition {from} -> {to}: target state is not registered")]
    UnregisteredState {
        from: &'static str,
        to: &'static str,
    },
    #[error("invalid editor configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}
