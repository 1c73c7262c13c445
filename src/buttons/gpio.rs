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
use rppal::gpio::{Gpio, InputPin};
use tracing::info;

use super::{Samples, BUTTON_COUNT, SCAN_ORDER};

/// The bias applied to the button lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pull {
    Up,
    #[default]
    Down,
    None,
}

/// Samples the buttons from GPIO lines.
pub struct GpioSampler {
    /// Input pins, in scan order.
    pins: Vec<InputPin>,
    /// Whether a low line means pressed.
    active_low: bool,
}

impl GpioSampler {
    /// Claims the given BCM pins, given in scan order.
    pub fn new(
        pins: [u8; BUTTON_COUNT],
        pull: Pull,
        active_low: bool,
    ) -> Result<GpioSampler, rppal::gpio::Error> {
        let gpio = Gpio::new()?;
        let pins = pins
            .iter()
            .map(|pin| {
                let pin = gpio.get(*pin)?;
                Ok(match pull {
                    Pull::Up => pin.into_input_pullup(),
                    Pull::Down => pin.into_input_pulldown(),
                    Pull::None => pin.into_input(),
                })
            })
            .collect::<Result<Vec<InputPin>, rppal::gpio::Error>>()?;

        info!(?pull, active_low, "Claimed button pins.");

        Ok(GpioSampler { pins, active_low })
    }
}

impl super::Sampler for GpioSampler {
    fn sample(&self) -> Samples {
        let mut samples = Samples::default();
        for (button, pin) in SCAN_ORDER.iter().zip(self.pins.iter()) {
            samples.set(*button, pin.is_high() != self.active_low);
        }
        samples
    }
}
