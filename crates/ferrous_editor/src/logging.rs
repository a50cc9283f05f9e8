//! Process-wide logger installation.
//!
//! Library code only talks to the `log` facade; the binary (or the host
//! application) calls [`init`] once at startup.

use std::str::FromStr;

use log::LevelFilter;

use crate::error::EditorError;

/// Parses a level name such as `"info"` or `"trace"`.
pub fn parse_level(level: &str) -> Result<LevelFilter, EditorError> {
    LevelFilter::from_str(level).map_err(|_| EditorError::InvalidLogLevel(level.to_string()))
}

/// Installs a `fern` dispatcher printing `[LEVEL][target] message` to
/// stdout.  Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
