//! Physical input backends: GPIO buttons and an analog joystick.
//!
//! Pin reads and ADC conversion go through the [`Gpio`] / [`AnalogAxes`]
//! seams; the electrical setup behind them is the platform's concern. Both
//! variants debounce their switch signals.

use std::time::{Duration, Instant};

use crate::config::{ButtonPins, JoystickPins};
use crate::input::debounce::Debouncer;
use crate::input::InputBackend;
use crate::types::{InputSnapshot, DEBOUNCE_WINDOW_MS, JOYSTICK_HIGH, JOYSTICK_LOW};

/// Raw digital pin levels. Buttons are wired pull-up, so a pressed button
/// reads low.
pub trait Gpio {
    fn read(&mut self, pin: u8) -> bool;
}

/// Normalized analog channel reads (0.0..=1.0, 0.5 at rest).
pub trait AnalogAxes {
    fn read(&mut self, channel: u8) -> f32;
}

pub struct ButtonsInput {
    gpio: Box<dyn Gpio>,
    pins: ButtonPins,
    debouncers: [Debouncer; 6],
}

impl ButtonsInput {
    pub fn new(gpio: Box<dyn Gpio>, pins: ButtonPins) -> Self {
        let window = Duration::from_millis(DEBOUNCE_WINDOW_MS);
        Self {
            gpio,
            pins,
            debouncers: std::array::from_fn(|_| Debouncer::new(window)),
        }
    }

    fn sample_at(&mut self, now: Instant) -> InputSnapshot {
        let pins = [
            self.pins.left,
            self.pins.right,
            self.pins.up,
            self.pins.down,
            self.pins.button_a,
            self.pins.button_b,
        ];
        let mut stable = [false; 6];
        for (i, pin) in pins.into_iter().enumerate() {
            let pressed = !self.gpio.read(pin);
            stable[i] = self.debouncers[i].update(pressed, now);
        }
        InputSnapshot {
            left: stable[0],
            right: stable[1],
            up: stable[2],
            down: stable[3],
            button_a: stable[4],
            button_b: stable[5],
        }
    }
}

impl InputBackend for ButtonsInput {
    fn sample(&mut self) -> InputSnapshot {
        self.sample_at(Instant::now())
    }

    fn shutdown(&mut self) {}
}

pub struct JoystickInput {
    adc: Box<dyn AnalogAxes>,
    gpio: Box<dyn Gpio>,
    pins: JoystickPins,
    debouncers: [Debouncer; 2],
}

impl JoystickInput {
    pub fn new(adc: Box<dyn AnalogAxes>, gpio: Box<dyn Gpio>, pins: JoystickPins) -> Self {
        let window = Duration::from_millis(DEBOUNCE_WINDOW_MS);
        Self {
            adc,
            gpio,
            pins,
            debouncers: std::array::from_fn(|_| Debouncer::new(window)),
        }
    }

    fn sample_at(&mut self, now: Instant) -> InputSnapshot {
        let x = self.adc.read(self.pins.x_channel);
        let y = self.adc.read(self.pins.y_channel);

        let a = !self.gpio.read(self.pins.button_a);
        let b = !self.gpio.read(self.pins.button_b);

        InputSnapshot {
            left: x < JOYSTICK_LOW,
            right: x > JOYSTICK_HIGH,
            up: y < JOYSTICK_LOW,
            down: y > JOYSTICK_HIGH,
            button_a: self.debouncers[0].update(a, now),
            button_b: self.debouncers[1].update(b, now),
        }
    }
}

impl InputBackend for JoystickInput {
    fn sample(&mut self) -> InputSnapshot {
        self.sample_at(Instant::now())
    }

    fn shutdown(&mut self) {}
}
