//! Engine configuration.
//!
//! Defaults mirror the common wiring for a Raspberry Pi with a PCF8574 I2C
//! backpack and pull-up buttons on BCM-numbered GPIO pins.

use crossterm::event::KeyCode;

/// Display backend configuration.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// I2C bus number (bus 1 is GPIO2/GPIO3 on a Pi).
    pub i2c_port: u8,
    /// Candidate bus addresses, probed in order at startup.
    pub addresses: Vec<u8>,
    pub backlight: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_port: 1,
            addresses: vec![0x27, 0x3F, 0x26, 0x25],
            backlight: true,
        }
    }
}

/// GPIO pin assignment for the six button signals (BCM numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPins {
    pub left: u8,
    pub right: u8,
    pub up: u8,
    pub down: u8,
    pub button_a: u8,
    pub button_b: u8,
}

impl Default for ButtonPins {
    fn default() -> Self {
        Self {
            left: 17,
            right: 18,
            up: 22,
            down: 23,
            button_a: 27,
            button_b: 24,
        }
    }
}

/// Joystick wiring: two ADC channels plus debounced action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickPins {
    pub x_channel: u8,
    pub y_channel: u8,
    pub button_a: u8,
    pub button_b: u8,
}

impl Default for JoystickPins {
    fn default() -> Self {
        Self {
            x_channel: 0,
            y_channel: 1,
            button_a: 27,
            button_b: 24,
        }
    }
}

/// Key bindings for the keyboard (emulated) input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub button_a: KeyCode,
    pub button_b: KeyCode,
    /// Pressing this asks the engine to stop.
    pub quit: KeyCode,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            left: KeyCode::Char('a'),
            right: KeyCode::Char('d'),
            up: KeyCode::Char('w'),
            down: KeyCode::Char('s'),
            button_a: KeyCode::Char('j'),
            button_b: KeyCode::Char('l'),
            quit: KeyCode::Esc,
        }
    }
}

/// Which input variant to run, resolved once at startup.
#[derive(Debug, Clone)]
pub enum InputConfig {
    Buttons(ButtonPins),
    Joystick(JoystickPins),
    Keyboard(KeyMap),
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig::Buttons(ButtonPins::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub display: DisplayConfig,
    pub input: InputConfig,
}
