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

use super::{Button, Samples};

/// A mock sampler. Buttons stay down until released.
#[derive(Clone, Default)]
pub struct MockSampler {
    samples: Arc<Mutex<Samples>>,
}

impl MockSampler {
    pub fn new() -> MockSampler {
        MockSampler::default()
    }

    /// Holds the button down.
    pub fn press(&self, button: Button) {
        self.samples.lock().set(button, true);
    }

    /// Lets go of the button.
    pub fn release(&self, button: Button) {
        self.samples.lock().set(button, false);
    }
}

impl super::Sampler for MockSampler {
    fn sample(&self) -> Samples {
        *self.samples.lock()
    }
}
