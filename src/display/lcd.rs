// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! HD44780 character LCD behind a PCF8574 I2C expander, in 4-bit mode.
//!
//! Expander bits: P0 = RS, P1 = RW, P2 = EN, P3 = backlight, P4..P7 = D4..D7.

use std::time::Duration;

use parking_lot::Mutex;
use rppal::i2c::I2c;
use tracing::info;

use super::{DisplayError, COLUMNS, ROWS};

/// The usual address of a PCF8574 backpack.
pub const DEFAULT_ADDRESS: u16 = 0x27;

/// The I2C bus exposed on the Raspberry Pi header.
pub const DEFAULT_BUS: u8 = 1;

const RS: u8 = 0b0000_0001;
const EN: u8 = 0b0000_0100;
const BACKLIGHT: u8 = 0b0000_1000;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_SET: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first column of each row on a 20x4 panel.
const ROW_OFFSETS: [u8; ROWS] = [0x00, 0x40, 0x14, 0x54];

/// Something that takes one expander byte at a time.
pub trait Bus: Send {
    fn send(&mut self, byte: u8) -> Result<(), DisplayError>;
}

impl Bus for I2c {
    fn send(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.write(&[byte])?;
        Ok(())
    }
}

/// A character LCD.
pub struct Lcd<B: Bus> {
    bus: Mutex<B>,
}

/// An LCD on a Raspberry Pi I2C bus.
pub type LcdDisplay = Lcd<I2c>;

impl LcdDisplay {
    /// Opens the LCD at the given bus and address and initializes it.
    pub fn open(bus: u8, address: u16) -> Result<LcdDisplay, DisplayError> {
        let mut i2c = I2c::with_bus(bus)?;
        i2c.set_slave_address(address)?;
        let lcd = Lcd::init(i2c)?;
        info!(bus, address, "Initialized LCD.");
        Ok(lcd)
    }
}

impl<B: Bus> Lcd<B> {
    /// Runs the 4-bit initialization sequence and blanks the display.
    pub fn init(bus: B) -> Result<Lcd<B>, DisplayError> {
        let lcd = Lcd {
            bus: Mutex::new(bus),
        };

        {
            let mut bus = lcd.bus.lock();
            spin_sleep::sleep(Duration::from_millis(50));
            bus.send(BACKLIGHT)?;

            // Force 8-bit mode three times so the controller is in a known state no matter
            // which nibble it was waiting for, then switch to 4-bit.
            for wait in [4500, 4500, 150] {
                pulse(&mut *bus, 0x30)?;
                spin_sleep::sleep(Duration::from_micros(wait));
            }
            pulse(&mut *bus, 0x20)?;

            command(&mut *bus, CMD_FUNCTION_SET)?;
            command(&mut *bus, CMD_DISPLAY_ON)?;
            command(&mut *bus, CMD_CLEAR)?;
            spin_sleep::sleep(Duration::from_millis(2));
            command(&mut *bus, CMD_ENTRY_MODE)?;
        }

        Ok(lcd)
    }

    #[cfg(test)]
    pub fn into_bus(self) -> B {
        self.bus.into_inner()
    }
}

impl<B: Bus> super::Display for Lcd<B> {
    fn clear(&self) -> Result<(), DisplayError> {
        let mut bus = self.bus.lock();
        command(&mut *bus, CMD_CLEAR)?;
        spin_sleep::sleep(Duration::from_millis(2));
        Ok(())
    }

    fn write_at(&self, col: usize, row: usize, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLUMNS {
            return Err(DisplayError::OutOfBounds { col, row });
        }

        let mut bus = self.bus.lock();
        command(&mut *bus, CMD_SET_DDRAM | (ROW_OFFSETS[row] + col as u8))?;
        for c in text.chars().take(COLUMNS - col) {
            let byte = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
            send(&mut *bus, byte, RS)?;
        }
        Ok(())
    }
}

fn command<B: Bus + ?Sized>(bus: &mut B, value: u8) -> Result<(), DisplayError> {
    send(bus, value, 0)
}

/// Sends a byte as two nibbles, high first.
fn send<B: Bus + ?Sized>(bus: &mut B, value: u8, mode: u8) -> Result<(), DisplayError> {
    pulse(bus, (value & 0xF0) | mode)?;
    pulse(bus, ((value << 4) & 0xF0) | mode)
}

/// Latches the upper nibble of data into the controller.
fn pulse<B: Bus + ?Sized>(bus: &mut B, data: u8) -> Result<(), DisplayError> {
    bus.send(data | BACKLIGHT | EN)?;
    spin_sleep::sleep(Duration::from_micros(1));
    bus.send((data | BACKLIGHT) & !EN)?;
    spin_sleep::sleep(Duration::from_micros(50));
    Ok(())
}
