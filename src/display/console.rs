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

use super::{DisplayError, Screen};

/// Prints display rows to stdout as they change. Useful when no LCD is attached.
pub struct ConsoleDisplay {
    screen: Mutex<Screen>,
}

impl ConsoleDisplay {
    pub fn new() -> ConsoleDisplay {
        ConsoleDisplay {
            screen: Mutex::new(Screen::new()),
        }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        ConsoleDisplay::new()
    }
}

impl super::Display for ConsoleDisplay {
    fn clear(&self) -> Result<(), DisplayError> {
        self.screen.lock().clear();
        Ok(())
    }

    fn write_at(&self, col: usize, row: usize, text: &str) -> Result<(), DisplayError> {
        let mut screen = self.screen.lock();
        screen.write_at(col, row, text)?;
        println!("[{}] {}", row, screen.line(row));
        Ok(())
    }
}
