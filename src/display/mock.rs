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

use super::{DisplayError, Screen};

/// A mock display. Only keeps the screen contents in memory.
#[derive(Clone, Default)]
pub struct MockDisplay {
    screen: Arc<Mutex<Screen>>,
    clears: Arc<Mutex<usize>>,
}

impl MockDisplay {
    pub fn new() -> MockDisplay {
        MockDisplay::default()
    }

    /// Gets the text on the given row.
    pub fn line(&self, row: usize) -> String {
        self.screen.lock().line(row)
    }

    /// Gets the number of times the display was cleared.
    pub fn clear_count(&self) -> usize {
        *self.clears.lock()
    }
}

impl super::Display for MockDisplay {
    fn clear(&self) -> Result<(), DisplayError> {
        self.screen.lock().clear();
        *self.clears.lock() += 1;
        Ok(())
    }

    fn write_at(&self, col: usize, row: usize, text: &str) -> Result<(), DisplayError> {
        self.screen.lock().write_at(col, row, text)
    }
}
