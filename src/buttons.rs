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
use std::fmt;

use crate::presets::{Loop, Preset};

mod gpio;
mod mock;

pub use gpio::{GpioSampler, Pull};

/// The number of buttons on the pedal.
pub const BUTTON_COUNT: usize = 9;

/// A physical button on the pedal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    BankUp,
    BankDown,
    Preset1,
    Preset2,
    Preset3,
    Loop1,
    Loop2,
    Loop3,
    Loop4,
}

/// The order buttons are scanned in when nothing is being tracked. When several buttons
/// are down in the same cycle, the one earliest in this list wins and the others are
/// only seen once it has been released.
pub const SCAN_ORDER: [Button; BUTTON_COUNT] = [
    Button::BankUp,
    Button::BankDown,
    Button::Preset1,
    Button::Preset2,
    Button::Preset3,
    Button::Loop1,
    Button::Loop2,
    Button::Loop3,
    Button::Loop4,
];

impl Button {
    /// The position of the button in the scan order.
    pub fn index(self) -> usize {
        match self {
            Button::BankUp => 0,
            Button::BankDown => 1,
            Button::Preset1 => 2,
            Button::Preset2 => 3,
            Button::Preset3 => 4,
            Button::Loop1 => 5,
            Button::Loop2 => 6,
            Button::Loop3 => 7,
            Button::Loop4 => 8,
        }
    }

    /// The preset this button selects, if it's a preset button.
    pub fn preset(self) -> Option<Preset> {
        match self {
            Button::Preset1 => Preset::new(0),
            Button::Preset2 => Preset::new(1),
            Button::Preset3 => Preset::new(2),
            _ => None,
        }
    }

    /// The loop this button toggles, if it's a loop button.
    pub fn loop_index(self) -> Option<Loop> {
        match self {
            Button::Loop1 => Loop::new(0),
            Button::Loop2 => Loop::new(1),
            Button::Loop3 => Loop::new(2),
            Button::Loop4 => Loop::new(3),
            _ => None,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::BankUp => write!(f, "bank up"),
            Button::BankDown => write!(f, "bank down"),
            _ => match (self.preset(), self.loop_index()) {
                (Some(preset), _) => write!(f, "preset {}", preset),
                (_, Some(lp)) => write!(f, "loop {}", lp),
                _ => unreachable!("every other button is a preset or loop button"),
            },
        }
    }
}

/// The raw state of every button during one control cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Samples([bool; BUTTON_COUNT]);

impl Samples {
    /// Creates samples with only the given buttons pressed.
    pub fn pressed(buttons: &[Button]) -> Samples {
        let mut samples = Samples::default();
        buttons.iter().for_each(|button| samples.set(*button, true));
        samples
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.0[button.index()]
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        self.0[button.index()] = pressed;
    }

    /// The first pressed button in scan order.
    pub fn first_pressed(&self) -> Option<Button> {
        SCAN_ORDER
            .iter()
            .copied()
            .find(|button| self.is_pressed(*button))
    }
}

/// Reads the raw state of every button. Keeps no memory between calls.
pub trait Sampler: Send {
    fn sample(&self) -> Samples;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_order_matches_index() {
        for (position, button) in SCAN_ORDER.iter().enumerate() {
            assert_eq!(position, button.index());
        }
    }

    #[test]
    fn button_mappings() {
        assert_eq!(Preset::new(0), Button::Preset1.preset());
        assert_eq!(Preset::new(2), Button::Preset3.preset());
        assert_eq!(None, Button::BankUp.preset());
        assert_eq!(Loop::new(0), Button::Loop1.loop_index());
        assert_eq!(Loop::new(3), Button::Loop4.loop_index());
        assert_eq!(None, Button::Preset2.loop_index());
        assert_eq!("preset 2", Button::Preset2.to_string());
        assert_eq!("loop 4", Button::Loop4.to_string());
    }

    #[test]
    fn first_pressed_follows_scan_order() {
        assert_eq!(None, Samples::default().first_pressed());
        assert_eq!(
            Some(Button::BankDown),
            Samples::pressed(&[Button::Loop1, Button::BankDown, Button::Preset3]).first_pressed()
        );
        assert_eq!(
            Some(Button::Preset2),
            Samples::pressed(&[Button::Loop4, Button::Preset2]).first_pressed()
        );
    }
}
