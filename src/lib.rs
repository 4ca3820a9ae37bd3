//! Game engine for 16x2 character LCD displays.
//!
//! Games are built from [`GameObject`]s placed on a 2-row, 16-column grid,
//! drawn either as literal characters or as one of the display's 8
//! programmable glyph slots. The same game runs unmodified against the real
//! I2C module or a terminal emulator; backend choice (and fallback when the
//! hardware is absent) happens once at startup.
//!
//! ```no_run
//! use lcd_engine::{Engine, EngineConfig, GameObject, Glyph, Hardware, Position};
//!
//! #[derive(Clone)]
//! struct Player {
//!     pos: Position,
//! }
//!
//! impl GameObject for Player {
//!     fn position(&self) -> Position {
//!         self.pos
//!     }
//!     fn render(&self) -> Glyph {
//!         Glyph::Char('@')
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut engine = Engine::from_config(&EngineConfig::default(), Hardware::default())?;
//!     engine.set_player(&Player {
//!         pos: Position::new(8, 1),
//!     });
//!     engine.run(10, |engine| {
//!         let input = engine.input();
//!         if let Some(player) = engine.player_as_mut::<Player>() {
//!             if input.left {
//!                 player.pos.x -= 1;
//!             }
//!             if input.right {
//!                 player.pos.x += 1;
//!             }
//!         }
//!     })?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod input;
pub mod sprite;
pub mod types;

pub use config::{ButtonPins, DisplayConfig, EngineConfig, InputConfig, JoystickPins, KeyMap};
pub use engine::{Engine, GameObject, Hardware, ObjectId, StateStore, Value};
pub use error::{EngineError, Result};
pub use sprite::{AssetSource, Bitmap, GlyphPattern, MemoryAssets, SpriteRegistry};
pub use types::{Glyph, InputSnapshot, Position, Symbol, COLS, GLYPH_SLOTS, ROWS};
