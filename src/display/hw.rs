//! Hardware display backend.
//!
//! The concrete I2C transaction encoding and controller timing live behind
//! [`LcdDriver`]; this module owns what is engine-level policy: address
//! discovery at startup, symbol-to-code mapping, and safe shutdown.

use crate::config::DisplayConfig;
use crate::display::DisplayBackend;
use crate::error::{EngineError, Result};
use crate::sprite::GlyphPattern;
use crate::types::{Symbol, GLYPH_HEIGHT};

/// A connected character-LCD module. Implementations encode the actual I2C
/// traffic for a specific expander/controller pair.
pub trait LcdDriver {
    fn program_glyph(&mut self, slot: u8, rows: &[u8; GLYPH_HEIGHT as usize]) -> Result<()>;

    /// Write one display code at a cell. Codes 0..8 address the custom
    /// characters, everything else is the controller's ROM charmap.
    fn write_code(&mut self, row: u8, col: u8, code: u8) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    fn set_backlight(&mut self, on: bool) -> Result<()>;

    fn close(&mut self);
}

/// Opens a driver at a candidate bus address.
pub trait LcdConnector {
    fn connect(&self, port: u8, address: u8) -> Result<Box<dyn LcdDriver>>;
}

pub struct HardwareDisplay {
    driver: Box<dyn LcdDriver>,
    address: u8,
    closed: bool,
}

impl HardwareDisplay {
    /// Probe the configured addresses in order; first responding wins.
    pub fn detect(config: &DisplayConfig, connector: &dyn LcdConnector) -> Result<Self> {
        for &address in &config.addresses {
            match connector.connect(config.i2c_port, address) {
                Ok(mut driver) => {
                    // A module that acks but cannot finish setup counts as a
                    // miss; the remaining candidates still get probed.
                    if let Err(err) = driver.set_backlight(config.backlight) {
                        log::warn!("LCD at 0x{address:02X} failed backlight setup: {err}");
                        continue;
                    }
                    log::info!("LCD connected at address 0x{address:02X}");
                    return Ok(Self {
                        driver,
                        address,
                        closed: false,
                    });
                }
                Err(err) => {
                    log::warn!("no LCD at address 0x{address:02X}: {err}");
                }
            }
        }
        Err(EngineError::BackendUnavailable(format!(
            "no LCD responded at any of {} candidate addresses",
            config.addresses.len()
        )))
    }

    pub fn address(&self) -> u8 {
        self.address
    }
}

fn symbol_code(symbol: Symbol) -> u8 {
    match symbol {
        Symbol::Blank => b' ',
        Symbol::Char(c) if c.is_ascii() && !c.is_ascii_control() => c as u8,
        // Non-ASCII falls outside the controller's ROM charmap.
        Symbol::Char(_) => b'?',
        Symbol::Glyph(slot) => slot,
    }
}

impl DisplayBackend for HardwareDisplay {
    fn program_glyph(&mut self, slot: u8, pattern: &GlyphPattern) -> Result<()> {
        self.driver.program_glyph(slot, pattern.rows())
    }

    fn write_cell(&mut self, row: u8, col: u8, symbol: Symbol) -> Result<()> {
        self.driver.write_code(row, col, symbol_code(symbol))
    }

    fn flush(&mut self) -> Result<()> {
        // Writes go straight to the bus; nothing is queued at this level.
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.driver.clear()
    }

    fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.driver.set_backlight(on)
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.driver.clear() {
            log::warn!("LCD clear on shutdown failed: {err}");
        }
        self.driver.close();
    }
}

impl Drop for HardwareDisplay {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct DriverLog {
        codes: Vec<(u8, u8, u8)>,
        closed: bool,
    }

    struct MockDriver {
        log: Rc<RefCell<DriverLog>>,
        fail_backlight: bool,
    }

    impl LcdDriver for MockDriver {
        fn program_glyph(&mut self, _slot: u8, _rows: &[u8; 8]) -> Result<()> {
            Ok(())
        }
        fn write_code(&mut self, row: u8, col: u8, code: u8) -> Result<()> {
            self.log.borrow_mut().codes.push((row, col, code));
            Ok(())
        }
        fn clear(&mut self) -> Result<()> {
            Ok(())
        }
        fn set_backlight(&mut self, _on: bool) -> Result<()> {
            if self.fail_backlight {
                return Err(EngineError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "backlight stuck",
                )));
            }
            Ok(())
        }
        fn close(&mut self) {
            self.log.borrow_mut().closed = true;
        }
    }

    struct MockConnector {
        live_addresses: Vec<u8>,
        flaky_backlight: Option<u8>,
        probes: RefCell<Vec<u8>>,
        log: Rc<RefCell<DriverLog>>,
    }

    impl LcdConnector for MockConnector {
        fn connect(&self, _port: u8, address: u8) -> Result<Box<dyn LcdDriver>> {
            self.probes.borrow_mut().push(address);
            if self.live_addresses.contains(&address) {
                Ok(Box::new(MockDriver {
                    log: self.log.clone(),
                    fail_backlight: self.flaky_backlight == Some(address),
                }))
            } else {
                Err(EngineError::BackendUnavailable("no ack".into()))
            }
        }
    }

    fn connector(live_address: u8) -> MockConnector {
        MockConnector {
            live_addresses: vec![live_address],
            flaky_backlight: None,
            probes: RefCell::new(Vec::new()),
            log: Rc::new(RefCell::new(DriverLog::default())),
        }
    }

    #[test]
    fn detect_probes_addresses_in_order_and_stops_at_first_hit() {
        let connector = connector(0x3F);
        let display = HardwareDisplay::detect(&DisplayConfig::default(), &connector).unwrap();
        assert_eq!(display.address(), 0x3F);
        assert_eq!(*connector.probes.borrow(), vec![0x27, 0x3F]);
    }

    #[test]
    fn detect_fails_when_nothing_responds() {
        let connector = connector(0x99);
        let err = HardwareDisplay::detect(&DisplayConfig::default(), &connector)
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::BackendUnavailable(_)));
        assert_eq!(connector.probes.borrow().len(), 4);
    }

    #[test]
    fn backlight_failure_during_probe_moves_to_next_address() {
        let mut connector = connector(0x27);
        connector.live_addresses = vec![0x27, 0x3F];
        connector.flaky_backlight = Some(0x27);

        let display = HardwareDisplay::detect(&DisplayConfig::default(), &connector).unwrap();
        assert_eq!(display.address(), 0x3F, "half-alive module skipped");
    }

    #[test]
    fn backlight_failure_at_every_address_is_backend_unavailable() {
        let mut connector = connector(0x27);
        connector.flaky_backlight = Some(0x27);

        let err = HardwareDisplay::detect(&DisplayConfig::default(), &connector)
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::BackendUnavailable(_)));
    }

    #[test]
    fn symbols_map_to_display_codes() {
        assert_eq!(symbol_code(Symbol::Blank), b' ');
        assert_eq!(symbol_code(Symbol::Char('A')), b'A');
        assert_eq!(symbol_code(Symbol::Char('é')), b'?');
        assert_eq!(symbol_code(Symbol::Glyph(5)), 5);
    }

    #[test]
    fn shutdown_closes_driver_once() {
        let connector = connector(0x27);
        let log = connector.log.clone();
        let mut display = HardwareDisplay::detect(&DisplayConfig::default(), &connector).unwrap();
        display.shutdown();
        display.shutdown();
        assert!(log.borrow().closed);
    }
}
