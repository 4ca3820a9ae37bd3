//! Sprite registry: names bound to the display's 8 custom-character slots.
//!
//! Registration converts the backing bitmap once and programs the display's
//! glyph memory; only the converted pattern is kept, so registry memory is
//! bounded by the slot count.

pub mod assets;
pub mod pattern;

pub use assets::{AssetSource, Bitmap, MemoryAssets};
pub use pattern::{rasterize, GlyphPattern};

use crate::display::DisplayBackend;
use crate::error::{EngineError, Result};
use crate::types::GLYPH_SLOTS;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    name: String,
    pattern: GlyphPattern,
}

/// Fixed table of at most 8 live name -> slot bindings.
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    slots: [Option<Binding>; GLYPH_SLOTS as usize],
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `slot`, overwriting any prior binding there.
    ///
    /// Programs the display's glyph memory exactly once; re-registering an
    /// identical name and pattern at the same slot performs no hardware
    /// write.
    pub fn register(
        &mut self,
        display: &mut dyn DisplayBackend,
        assets: &dyn AssetSource,
        name: &str,
        slot: u8,
    ) -> Result<u8> {
        if slot >= GLYPH_SLOTS {
            return Err(EngineError::SlotOutOfRange(slot));
        }

        let bitmap = assets.load(name)?;
        let pattern = rasterize(&bitmap);

        let binding = Binding {
            name: name.to_string(),
            pattern,
        };
        if self.slots[slot as usize].as_ref() == Some(&binding) {
            return Ok(slot);
        }

        display.program_glyph(slot, &pattern)?;
        log::info!("sprite `{name}` registered at glyph slot {slot}");
        self.slots[slot as usize] = Some(binding);
        Ok(slot)
    }

    /// Bind `name` to the first free slot.
    ///
    /// Fails with [`EngineError::TooManySprites`] when all 8 slots are bound;
    /// existing bindings are left untouched. A name already bound with an
    /// identical pattern returns its existing slot.
    pub fn register_auto(
        &mut self,
        display: &mut dyn DisplayBackend,
        assets: &dyn AssetSource,
        name: &str,
    ) -> Result<u8> {
        let bitmap = assets.load(name)?;
        let pattern = rasterize(&bitmap);

        for (slot, binding) in self.slots.iter().enumerate() {
            if let Some(b) = binding {
                if b.name == name && b.pattern == pattern {
                    return Ok(slot as u8);
                }
            }
        }

        let slot = self
            .slots
            .iter()
            .position(|b| b.is_none())
            .ok_or(EngineError::TooManySprites)? as u8;

        display.program_glyph(slot, &pattern)?;
        log::info!("sprite `{name}` registered at glyph slot {slot}");
        self.slots[slot as usize] = Some(Binding {
            name: name.to_string(),
            pattern,
        });
        Ok(slot)
    }

    /// Free a slot so it can be rebound.
    pub fn evict(&mut self, slot: u8) {
        if let Some(binding) = self.slots.get_mut(slot as usize) {
            *binding = None;
        }
    }

    /// Slot index for a registered name.
    pub fn resolve(&self, name: &str) -> Result<u8> {
        self.slots
            .iter()
            .position(|b| b.as_ref().is_some_and(|b| b.name == name))
            .map(|slot| slot as u8)
            .ok_or_else(|| EngineError::UnknownSprite(name.to_string()))
    }

    pub fn name_of(&self, slot: u8) -> Option<&str> {
        self.slots
            .get(slot as usize)?
            .as_ref()
            .map(|b| b.name.as_str())
    }

    pub fn is_bound(&self, slot: u8) -> bool {
        self.slots
            .get(slot as usize)
            .is_some_and(|b| b.is_some())
    }

    pub fn pattern(&self, slot: u8) -> Option<&GlyphPattern> {
        self.slots.get(slot as usize)?.as_ref().map(|b| &b.pattern)
    }
}
