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
use crate::presets::{Loop, LoopStates, LOOP_COUNT};

mod gpio;
mod mock;

pub use gpio::GpioOutputs;

/// Drives the switch line of each loop.
pub trait Outputs: Send + Sync {
    /// Engages or bypasses the loop.
    fn write(&self, lp: Loop, on: bool);

    /// Whether the loop is currently engaged.
    fn read(&self, lp: Loop) -> bool;

    /// Drives every loop to the given states.
    fn apply(&self, states: LoopStates) {
        for lp in Loop::all() {
            self.write(lp, states[lp.index()]);
        }
    }

    /// Reads every loop at once.
    fn snapshot(&self) -> LoopStates {
        let mut states = [false; LOOP_COUNT];
        for lp in Loop::all() {
            states[lp.index()] = self.read(lp);
        }
        states
    }
}
