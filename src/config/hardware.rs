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
use std::{error::Error, sync::Arc};

use serde::Deserialize;

use crate::{
    buttons::{self, BUTTON_COUNT},
    display::{self, lcd},
    outputs,
    presets::{LOOP_COUNT, PRESETS_PER_BANK},
};

/// Line bias for the buttons.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Pull {
    Up,
    #[default]
    Down,
    None,
}

impl From<Pull> for buttons::Pull {
    fn from(pull: Pull) -> Self {
        match pull {
            Pull::Up => buttons::Pull::Up,
            Pull::Down => buttons::Pull::Down,
            Pull::None => buttons::Pull::None,
        }
    }
}

/// The BCM pins the buttons are wired to.
#[derive(Deserialize, Clone)]
pub struct Buttons {
    bank_up: u8,
    bank_down: u8,
    presets: [u8; PRESETS_PER_BANK],
    loops: [u8; LOOP_COUNT],
    #[serde(default)]
    pull: Pull,
    #[serde(default)]
    active_low: bool,
}

impl Buttons {
    /// The pins in scan order.
    pub fn pins(&self) -> [u8; BUTTON_COUNT] {
        let mut pins = [0u8; BUTTON_COUNT];
        pins[0] = self.bank_up;
        pins[1] = self.bank_down;
        pins[2..2 + PRESETS_PER_BANK].copy_from_slice(&self.presets);
        pins[2 + PRESETS_PER_BANK..].copy_from_slice(&self.loops);
        pins
    }

    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Claims the button pins.
    pub fn sampler(&self) -> Result<Box<dyn buttons::Sampler>, Box<dyn Error>> {
        Ok(Box::new(buttons::GpioSampler::new(
            self.pins(),
            self.pull.into(),
            self.active_low,
        )?))
    }
}

/// The BCM pins the loop switches are wired to.
#[derive(Deserialize, Clone)]
pub struct Loops {
    pins: [u8; LOOP_COUNT],
    #[serde(default)]
    active_low: bool,
}

impl Loops {
    pub fn pins(&self) -> [u8; LOOP_COUNT] {
        self.pins
    }

    /// Claims the loop pins.
    pub fn outputs(&self) -> Result<Arc<dyn outputs::Outputs>, Box<dyn Error>> {
        Ok(Arc::new(outputs::GpioOutputs::new(
            self.pins,
            self.active_low,
        )?))
    }
}

/// Allows users to pick a display.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Display {
    Lcd(LcdDisplay),
    Console,
}

/// An HD44780 LCD on an I2C backpack.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LcdDisplay {
    bus: Option<u8>,
    address: Option<u16>,
}

impl Display {
    /// Opens the configured display.
    pub fn open(&self) -> Result<Arc<dyn display::Display>, Box<dyn Error>> {
        Ok(match self {
            Display::Lcd(lcd) => Arc::new(display::LcdDisplay::open(
                lcd.bus.unwrap_or(lcd::DEFAULT_BUS),
                lcd.address.unwrap_or(lcd::DEFAULT_ADDRESS),
            )?),
            Display::Console => Arc::new(display::ConsoleDisplay::new()),
        })
    }
}
