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
#![cfg(test)]

use std::sync::Arc;

use parking_lot::Mutex;

use crate::presets::{Loop, LoopStates};

/// Mock loop outputs. Remembers the last state written to each loop.
#[derive(Clone, Default)]
pub struct MockOutputs {
    states: Arc<Mutex<LoopStates>>,
    writes: Arc<Mutex<usize>>,
}

impl MockOutputs {
    pub fn new() -> MockOutputs {
        MockOutputs::default()
    }

    /// The current state of every loop.
    pub fn states(&self) -> LoopStates {
        *self.states.lock()
    }

    /// The number of writes made to any loop.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl super::Outputs for MockOutputs {
    fn write(&self, lp: Loop, on: bool) {
        self.states.lock()[lp.index()] = on;
        *self.writes.lock() += 1;
    }

    fn read(&self, lp: Loop) -> bool {
        self.states.lock()[lp.index()]
    }
}
