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
use crate::presets::Selection;

mod console;
pub mod lcd;
mod mock;

pub use console::ConsoleDisplay;
pub use lcd::LcdDisplay;

/// Columns on the status display.
pub const COLUMNS: usize = 20;

/// Rows on the status display.
pub const ROWS: usize = 4;

/// The row status messages are written to.
pub const MESSAGE_ROW: usize = 3;

/// Shown after the current preset has been saved.
pub const SAVED_MESSAGE: &str = "Preset saved!";

/// Shown when the current preset couldn't be persisted.
pub const SAVE_FAILED_MESSAGE: &str = "Save failed!";

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("I2C error: {0}")]
    I2c(#[from] rppal::i2c::Error),

    #[error("position ({col}, {row}) is off the display")]
    OutOfBounds { col: usize, row: usize },
}

/// A character display.
pub trait Display: Send + Sync {
    /// Blanks the whole display.
    fn clear(&self) -> Result<(), DisplayError>;

    /// Writes text starting at the given position. Text past the last column is dropped.
    fn write_at(&self, col: usize, row: usize, text: &str) -> Result<(), DisplayError>;
}

/// Clears the display and shows the bank, preset and MIDI program for the selection.
pub fn show_selection(display: &dyn Display, selection: &Selection) -> Result<(), DisplayError> {
    display.clear()?;
    display.write_at(0, 0, &format!("Bank: {}", selection.bank()))?;
    display.write_at(0, 1, &format!("Preset: {}", selection.preset()))?;
    display.write_at(0, 2, &format!("MIDI Program: {}", selection.program().as_int()))?;
    Ok(())
}

/// Shows a message on the message row, leaving the status rows alone.
pub fn show_message(display: &dyn Display, message: &str) -> Result<(), DisplayError> {
    display.write_at(0, MESSAGE_ROW, &format!("{:<width$}", message, width = COLUMNS))
}

/// An in-memory copy of what's on a character display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    rows: [[char; COLUMNS]; ROWS],
}

impl Screen {
    pub fn new() -> Screen {
        Screen {
            rows: [[' '; COLUMNS]; ROWS],
        }
    }

    pub fn clear(&mut self) {
        self.rows = [[' '; COLUMNS]; ROWS];
    }

    /// Writes the text, clipped to the row.
    pub fn write_at(&mut self, col: usize, row: usize, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLUMNS {
            return Err(DisplayError::OutOfBounds { col, row });
        }

        self.rows[row][col..]
            .iter_mut()
            .zip(text.chars())
            .for_each(|(cell, c)| *cell = c);
        Ok(())
    }

    /// The row's text with trailing blanks removed.
    pub fn line(&self, row: usize) -> String {
        self.rows[row]
            .iter()
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::new()
    }
}
