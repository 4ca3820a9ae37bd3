//! Input backends producing one [`InputSnapshot`] per frame.
//!
//! Variants: physical buttons, analog joystick, and a keyboard fallback for
//! development. The variant is resolved once at startup; there is no mid-run
//! switching.

pub mod debounce;
pub mod gpio;
pub mod keyboard;
pub mod scripted;

pub use debounce::Debouncer;
pub use gpio::{AnalogAxes, ButtonsInput, Gpio, JoystickInput};
pub use keyboard::KeyboardInput;
pub use scripted::ScriptedInput;

use crate::config::{InputConfig, KeyMap};
use crate::error::Result;
use crate::types::InputSnapshot;

pub trait InputBackend {
    /// Capture the current input state. Called once per frame; the snapshot
    /// is immutable after capture.
    fn sample(&mut self) -> InputSnapshot;

    /// Whether the backend itself wants the loop to stop (e.g. the keyboard
    /// quit key).
    fn quit_requested(&self) -> bool {
        false
    }

    fn shutdown(&mut self);
}

/// Resolve the input backend once at startup.
///
/// Hardware variants need their seam supplied; when it is missing the
/// selection falls back to the keyboard with a warning, mirroring how the
/// engine behaves on a workstation without GPIO.
pub fn select(
    config: &InputConfig,
    gpio: Option<Box<dyn Gpio>>,
    adc: Option<Box<dyn AnalogAxes>>,
) -> Result<Box<dyn InputBackend>> {
    match config {
        InputConfig::Buttons(pins) => match gpio {
            Some(gpio) => Ok(Box::new(ButtonsInput::new(gpio, *pins))),
            None => {
                log::warn!("GPIO unavailable; falling back to keyboard input");
                Ok(Box::new(KeyboardInput::new(KeyMap::default())))
            }
        },
        InputConfig::Joystick(pins) => match (adc, gpio) {
            (Some(adc), Some(gpio)) => Ok(Box::new(JoystickInput::new(adc, gpio, *pins))),
            _ => {
                log::warn!("joystick ADC/GPIO unavailable; falling back to keyboard input");
                Ok(Box::new(KeyboardInput::new(KeyMap::default())))
            }
        },
        InputConfig::Keyboard(map) => Ok(Box::new(KeyboardInput::new(*map))),
    }
}
