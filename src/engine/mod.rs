//! Engine runtime: owns the backends, the object table, the sprite registry,
//! and the fixed-cadence game loop.
//!
//! Each frame runs sequentially with no suspension points: sample input,
//! invoke the user loop hook, update objects, resolve collisions, render with
//! changed-cell diffing, then sleep whatever remains of the frame budget.
//! Everything here is single-threaded; the only shared value is the stop
//! sentinel, which signal handlers may set from outside.

pub mod objects;
pub mod state;

pub use objects::{AsAny, GameObject, ObjectClone, ObjectId};
pub use state::{StateStore, Value};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::display::{self, DisplayBackend, FrameBuffer, LcdConnector};
use crate::error::Result;
use crate::input::{self, AnalogAxes, Gpio, InputBackend};
use crate::sprite::{AssetSource, SpriteRegistry};
use crate::types::{Glyph, InputSnapshot, Symbol, COLS, ROWS};

use objects::ObjectTable;

/// Optional hardware seams, probed once at startup. All `None` on a
/// workstation, which resolves to the emulator and keyboard.
#[derive(Default)]
pub struct Hardware {
    pub lcd: Option<Box<dyn LcdConnector>>,
    pub gpio: Option<Box<dyn Gpio>>,
    pub adc: Option<Box<dyn AnalogAxes>>,
}

pub struct Engine {
    display: Box<dyn DisplayBackend>,
    input: Box<dyn InputBackend>,
    sprites: SpriteRegistry,
    objects: ObjectTable,
    player: Option<Box<dyn GameObject>>,
    player_template: Option<Box<dyn GameObject>>,
    state: StateStore,
    state_template: StateStore,
    fb: FrameBuffer,
    prev_fb: FrameBuffer,
    snapshot: InputSnapshot,
    stop: Arc<AtomicBool>,
    fps: f64,
    frame_count: u64,
}

impl Engine {
    pub fn new(display: Box<dyn DisplayBackend>, input: Box<dyn InputBackend>) -> Self {
        Self {
            display,
            input,
            sprites: SpriteRegistry::new(),
            objects: ObjectTable::default(),
            player: None,
            player_template: None,
            state: StateStore::new(),
            state_template: StateStore::new(),
            fb: FrameBuffer::new(),
            prev_fb: FrameBuffer::new(),
            snapshot: InputSnapshot::default(),
            stop: Arc::new(AtomicBool::new(false)),
            fps: 0.0,
            frame_count: 0,
        }
    }

    /// Resolve both backends from configuration, with hardware -> emulated
    /// fallback chains.
    pub fn from_config(config: &EngineConfig, hardware: Hardware) -> Result<Self> {
        let display = display::select(&config.display, hardware.lcd.as_deref())?;
        let input = input::select(&config.input, hardware.gpio, hardware.adc)?;
        Ok(Self::new(display, input))
    }

    // ---- sprites ----

    /// Register a sprite at an explicit glyph slot. See
    /// [`SpriteRegistry::register`].
    pub fn register_sprite(
        &mut self,
        assets: &dyn AssetSource,
        name: &str,
        slot: u8,
    ) -> Result<u8> {
        self.sprites
            .register(self.display.as_mut(), assets, name, slot)
    }

    /// Register a sprite at the first free glyph slot. See
    /// [`SpriteRegistry::register_auto`].
    pub fn register_sprite_auto(&mut self, assets: &dyn AssetSource, name: &str) -> Result<u8> {
        self.sprites
            .register_auto(self.display.as_mut(), assets, name)
    }

    /// Glyph slot for a registered sprite name.
    pub fn resolve_sprite(&self, name: &str) -> Result<u8> {
        self.sprites.resolve(name)
    }

    /// Free a glyph slot so a later registration can rebind it.
    pub fn evict_sprite(&mut self, slot: u8) {
        self.sprites.evict(slot);
    }

    pub fn sprites(&self) -> &SpriteRegistry {
        &self.sprites
    }

    // ---- state ----

    /// Store a deep copy of `state` as both the live state and the reset
    /// template. Later mutation of the live copy never touches the template.
    pub fn set_state(&mut self, state: &StateStore) {
        self.state = state.clone();
        self.state_template = state.clone();
    }

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateStore {
        &mut self.state
    }

    // ---- player ----

    /// Store a deep copy of `player` as both the live player and the reset
    /// template. The caller's value stays independent.
    pub fn set_player<O: GameObject + Clone>(&mut self, player: &O) {
        self.player = Some(Box::new(player.clone()));
        self.player_template = Some(Box::new(player.clone()));
    }

    pub fn player(&self) -> Option<&dyn GameObject> {
        self.player.as_deref()
    }

    pub fn player_as<T: GameObject>(&self) -> Option<&T> {
        self.player
            .as_deref()
            .and_then(|p| p.as_any().downcast_ref::<T>())
    }

    pub fn player_as_mut<T: GameObject>(&mut self) -> Option<&mut T> {
        self.player
            .as_deref_mut()
            .and_then(|p| p.as_any_mut().downcast_mut::<T>())
    }

    // ---- objects ----

    /// Copy `object` into the table; the returned id is the only handle to
    /// the stored copy.
    pub fn new_object<O: GameObject + Clone>(&mut self, object: &O) -> ObjectId {
        self.objects.insert(Box::new(object.clone()))
    }

    /// Remove by identity. Deleting a stale or never-inserted id is a no-op.
    pub fn delete_object(&mut self, id: ObjectId) {
        self.objects.remove(id);
    }

    /// All live objects of concrete type `T` in insertion order. The player
    /// is never included.
    pub fn get_objects_of<T: GameObject>(&self) -> Vec<(ObjectId, &T)> {
        self.objects.of_type::<T>()
    }

    pub fn object<T: GameObject>(&self, id: ObjectId) -> Option<&T> {
        self.objects
            .get(id)
            .and_then(|obj| obj.as_any().downcast_ref::<T>())
    }

    pub fn object_mut<T: GameObject>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects
            .get_mut(id)
            .and_then(|obj| (**obj).as_any_mut().downcast_mut::<T>())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Clear the object table only; player and state are untouched.
    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }

    /// Restore player and state from their templates and clear the object
    /// table. No table snapshot exists; a full clear is the only table-reset
    /// behavior.
    pub fn reset(&mut self) {
        self.player = self.player_template.clone();
        self.state = self.state_template.clone();
        self.objects.clear();
    }

    // ---- loop ----

    /// The input snapshot captured at the start of the current frame.
    pub fn input(&self) -> InputSnapshot {
        self.snapshot
    }

    /// Ask the loop to stop after the current frame.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Shareable stop sentinel, e.g. for a SIGINT handler.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.display.set_backlight(on)
    }

    /// Measured FPS of the most recent frame.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run the fixed-cadence loop until the stop sentinel is set or the input
    /// backend requests quit. Backend shutdown runs on every exit path.
    pub fn run<F>(&mut self, target_fps: u32, mut loop_fn: F) -> Result<()>
    where
        F: FnMut(&mut Engine),
    {
        let result = self.run_loop(target_fps, &mut loop_fn);
        self.display.shutdown();
        self.input.shutdown();
        result
    }

    fn run_loop(&mut self, target_fps: u32, loop_fn: &mut dyn FnMut(&mut Engine)) -> Result<()> {
        let period = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        log::info!("game loop starting at {} fps", target_fps.max(1));

        // Re-arm the sentinel so a previously stopped engine can run again.
        self.stop.store(false, Ordering::Relaxed);

        self.display.clear()?;
        self.prev_fb.clear();

        let mut last_start: Option<Instant> = None;
        while !self.stop.load(Ordering::Relaxed) {
            let frame_start = Instant::now();
            let dt = last_start
                .map(|t| frame_start.duration_since(t))
                .unwrap_or_default();
            last_start = Some(frame_start);

            self.snapshot = self.input.sample();
            if self.input.quit_requested() {
                log::info!("input backend requested quit");
                break;
            }

            loop_fn(self);

            if let Some(player) = self.player.as_mut() {
                player.update(dt);
            }
            for obj in self.objects.iter_mut() {
                obj.update(dt);
            }

            self.resolve_collisions();
            self.render_frame();

            self.frame_count += 1;
            let dt_s = dt.as_secs_f64();
            if dt_s > 0.0 {
                self.fps = 1.0 / dt_s;
            }
            if self.frame_count % 100 == 0 {
                log::debug!(
                    "frame {}: {:.1} fps, {} objects",
                    self.frame_count,
                    self.fps,
                    self.objects.len()
                );
            }

            // Pace to the target period. Overruns get no sleep and no
            // catch-up; dropped frames are not replayed.
            if let Some(remaining) = period.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        Ok(())
    }

    /// Symmetric pairwise collision callbacks for coinciding positions, in
    /// table insertion order, then the player against every object.
    fn resolve_collisions(&mut self) {
        let n = self.objects.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = self.objects.pair_mut(i, j);
                if a.position() == b.position() {
                    a.on_collision(&**b);
                    b.on_collision(&**a);
                }
            }
        }

        if let Some(player) = self.player.as_mut() {
            for obj in self.objects.iter_mut() {
                if player.position() == obj.position() {
                    player.on_collision(&**obj);
                    obj.on_collision(&**player);
                }
            }
        }
    }

    /// Compose the next frame, diff against the previous one, and push only
    /// the changed cells. Render problems are contained to the offending
    /// object or cell; a frame is never aborted.
    fn render_frame(&mut self) {
        self.fb.clear();

        for (_, obj) in self.objects.iter() {
            Self::place(&mut self.fb, &self.sprites, obj);
        }
        // Player last: it overlays anything on the same cell.
        if let Some(player) = self.player.as_deref() {
            Self::place(&mut self.fb, &self.sprites, player);
        }

        let dirty: ArrayVec<(u8, u8, Symbol), { COLS as usize * ROWS as usize }> =
            self.fb.diff(&self.prev_fb).collect();
        if !dirty.is_empty() {
            for (row, col, symbol) in dirty {
                if let Err(err) = self.display.write_cell(row, col, symbol) {
                    log::warn!("cell ({row},{col}) write failed: {err}");
                }
            }
            if let Err(err) = self.display.flush() {
                log::warn!("display flush failed: {err}");
            }
        }

        std::mem::swap(&mut self.fb, &mut self.prev_fb);
    }

    fn place(fb: &mut FrameBuffer, sprites: &SpriteRegistry, obj: &dyn GameObject) {
        // Off-grid is a valid transient state, not an error.
        let Some((row, col)) = obj.position().cell() else {
            return;
        };
        let symbol = match obj.render() {
            Glyph::Char(c) => Symbol::Char(c),
            Glyph::Slot(slot) if sprites.is_bound(slot) => Symbol::Glyph(slot),
            Glyph::Slot(slot) => {
                // Unbound slot: this object renders blank, the frame goes on.
                log::debug!("object at ({row},{col}) references unbound glyph slot {slot}");
                return;
            }
        };
        fb.set(row, col, symbol);
    }
}
