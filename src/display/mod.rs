//! Display backends for the 16x2 character grid.
//!
//! Two interchangeable variants: the real I2C module ([`hw`]) and a terminal
//! emulator ([`term`]). Backend choice is resolved once at startup; the
//! engine then talks to `dyn DisplayBackend` only, so game logic runs
//! unmodified against either. [`headless`] is a recording variant for tests
//! and CI.

pub mod fb;
pub mod headless;
pub mod hw;
pub mod term;

pub use fb::FrameBuffer;
pub use headless::HeadlessDisplay;
pub use hw::{HardwareDisplay, LcdConnector, LcdDriver};
pub use term::TerminalDisplay;

use crate::config::DisplayConfig;
use crate::error::{EngineError, Result};
use crate::sprite::GlyphPattern;
use crate::types::Symbol;

pub trait DisplayBackend {
    /// Program one of the 8 custom-character slots.
    fn program_glyph(&mut self, slot: u8, pattern: &GlyphPattern) -> Result<()>;

    /// Write a single cell. Callers are expected to diff against the previous
    /// frame and only send changed cells.
    fn write_cell(&mut self, row: u8, col: u8, symbol: Symbol) -> Result<()>;

    /// Push queued writes out to the device.
    fn flush(&mut self) -> Result<()>;

    /// Blank every cell.
    fn clear(&mut self) -> Result<()>;

    fn set_backlight(&mut self, on: bool) -> Result<()>;

    /// Leave the device in a safe state. Idempotent; runs on every engine
    /// exit path.
    fn shutdown(&mut self);
}

/// Resolve the display backend once at startup.
///
/// Tries the hardware at the configured addresses when a connector is
/// supplied, then falls back to the terminal emulator. Only when both are
/// unusable does this fail, with [`EngineError::InitializationFailed`].
pub fn select(
    config: &DisplayConfig,
    connector: Option<&dyn LcdConnector>,
) -> Result<Box<dyn DisplayBackend>> {
    if let Some(connector) = connector {
        match HardwareDisplay::detect(config, connector) {
            Ok(hw) => return Ok(Box::new(hw)),
            Err(EngineError::BackendUnavailable(reason)) => {
                log::warn!("hardware display unavailable ({reason}); falling back to emulator");
            }
            Err(err) => return Err(err),
        }
    }

    match TerminalDisplay::new(config.backlight) {
        Ok(term) => Ok(Box::new(term)),
        Err(err) => Err(EngineError::InitializationFailed(format!(
            "terminal emulator failed to start: {err}"
        ))),
    }
}
