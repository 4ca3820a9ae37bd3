//! Keyboard input backend (crossterm).
//!
//! Key events are already discrete, so no debouncing. Held keys are tracked
//! in a set; terminals that never emit release events get an auto-release
//! timeout so a single tap does not read as held forever.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

use crate::config::KeyMap;
use crate::input::InputBackend;
use crate::types::{InputSnapshot, KEY_RELEASE_TIMEOUT_MS};

pub struct KeyboardInput {
    map: KeyMap,
    held: HashMap<KeyCode, Instant>,
    release_timeout: Duration,
    quit: bool,
    raw_mode: bool,
}

impl KeyboardInput {
    pub fn new(map: KeyMap) -> Self {
        // Raw mode is required for key events; harmless if the display
        // backend already enabled it.
        let raw_mode = terminal::enable_raw_mode().is_ok();
        Self {
            map,
            held: HashMap::new(),
            release_timeout: Duration::from_millis(KEY_RELEASE_TIMEOUT_MS),
            quit: false,
            raw_mode,
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }

    fn drain_events(&mut self) {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    log::warn!("keyboard poll failed: {err}");
                    break;
                }
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(err) => {
                    log::warn!("keyboard read failed: {err}");
                    break;
                }
            };
            if let Event::Key(key) = ev {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if key.code == self.map.quit {
                            self.quit = true;
                        }
                        self.held.insert(key.code, Instant::now());
                    }
                    KeyEventKind::Release => {
                        self.held.remove(&key.code);
                    }
                }
            }
        }
    }

    fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains_key(&code)
    }
}

impl InputBackend for KeyboardInput {
    fn sample(&mut self) -> InputSnapshot {
        self.drain_events();

        // Auto-release keys not refreshed within the timeout.
        let timeout = self.release_timeout;
        self.held.retain(|_, seen| seen.elapsed() <= timeout);

        InputSnapshot {
            left: self.is_held(self.map.left),
            right: self.is_held(self.map.right),
            up: self.is_held(self.map.up),
            down: self.is_held(self.map.down),
            button_a: self.is_held(self.map.button_a),
            button_b: self.is_held(self.map.button_b),
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }

    fn shutdown(&mut self) {
        self.held.clear();
        // The display backend may not own the terminal (hardware LCD), so raw
        // mode is this backend's to give back. A second disable elsewhere is
        // harmless.
        if self.raw_mode {
            self.raw_mode = false;
            let _ = terminal::disable_raw_mode();
        }
    }
}
