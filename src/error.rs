//! Engine error taxonomy.
//!
//! Configuration and registration errors are returned synchronously to the
//! caller. Per-frame rendering problems are contained to the offending cell
//! and never surface here; see the render pass in [`crate::engine`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A hardware backend could not be reached at startup. Recoverable: the
    /// selection chain falls back to the emulated variant.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Sprite registration asked for a slot outside 0..8.
    #[error("glyph slot {0} out of range (0..{max})", max = crate::types::GLYPH_SLOTS)]
    SlotOutOfRange(u8),

    /// All 8 glyph slots are bound and none was explicitly evicted.
    #[error("all {} glyph slots are already bound", crate::types::GLYPH_SLOTS)]
    TooManySprites,

    /// The backing bitmap for a sprite name could not be located.
    #[error("sprite asset `{0}` not found")]
    AssetNotFound(String),

    /// The backing bitmap exists but is not usable.
    #[error("sprite asset `{name}` could not be decoded: {reason}")]
    AssetDecodeFailed { name: String, reason: String },

    /// A lookup referenced a sprite name that was never registered.
    #[error("sprite `{0}` was never registered")]
    UnknownSprite(String),

    /// Neither the hardware nor the emulated backend could initialize.
    /// Fatal: the game loop cannot start.
    #[error("no usable backend: {0}")]
    InitializationFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
