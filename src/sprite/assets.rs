//! Sprite asset boundary.
//!
//! The registry only needs `name -> raw RGBA pixels`; how those pixels are
//! produced (PNG files on disk, embedded data, generated art) is the caller's
//! concern. [`MemoryAssets`] covers tests and embedded sprite sets.

use std::collections::HashMap;

use crate::error::{EngineError, Result};

/// Raw RGBA pixel data, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Bitmap {
    /// Fails when the dimensions are zero or do not match the pixel count.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return Err(EngineError::AssetDecodeFailed {
                name: String::new(),
                reason: format!(
                    "bad dimensions: {}x{} with {} pixels",
                    width,
                    height,
                    pixels.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Resolves a sprite name to its bitmap.
pub trait AssetSource {
    /// Errors are [`EngineError::AssetNotFound`] or
    /// [`EngineError::AssetDecodeFailed`].
    fn load(&self, name: &str) -> Result<Bitmap>;
}

/// In-memory name -> bitmap map.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    bitmaps: HashMap<String, Bitmap>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bitmap: Bitmap) {
        self.bitmaps.insert(name.into(), bitmap);
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, name: &str) -> Result<Bitmap> {
        self.bitmaps
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::AssetNotFound(name.to_string()))
    }
}
