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
use parking_lot::Mutex;
use rppal::gpio::{Gpio, OutputPin};
use tracing::{debug, info};

use crate::presets::{Loop, LOOP_COUNT};

/// Switches loops through GPIO lines, usually wired to relays.
pub struct GpioOutputs {
    /// Output pins, in loop order.
    pins: Mutex<Vec<OutputPin>>,
    /// Whether driving a line low engages the loop.
    active_low: bool,
}

impl GpioOutputs {
    /// Claims the given BCM pins, in loop order. All loops start bypassed.
    pub fn new(
        pins: [u8; LOOP_COUNT],
        active_low: bool,
    ) -> Result<GpioOutputs, rppal::gpio::Error> {
        let gpio = Gpio::new()?;
        let pins = pins
            .iter()
            .map(|pin| {
                let pin = gpio.get(*pin)?;
                Ok(if active_low {
                    pin.into_output_high()
                } else {
                    pin.into_output_low()
                })
            })
            .collect::<Result<Vec<OutputPin>, rppal::gpio::Error>>()?;

        info!(active_low, "Claimed loop pins.");

        Ok(GpioOutputs {
            pins: Mutex::new(pins),
            active_low,
        })
    }
}

impl super::Outputs for GpioOutputs {
    fn write(&self, lp: Loop, on: bool) {
        let mut pins = self.pins.lock();
        let pin = &mut pins[lp.index()];
        if on != self.active_low {
            pin.set_high();
        } else {
            pin.set_low();
        }
        debug!(loop_number = lp.index() + 1, on, "Set loop.");
    }

    fn read(&self, lp: Loop) -> bool {
        self.pins.lock()[lp.index()].is_set_high() != self.active_low
    }
}
