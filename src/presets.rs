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

use midly::num::u7;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::store::{Store, StoreError};

/// The number of banks.
pub const BANK_COUNT: usize = 3;

/// The number of presets in each bank.
pub const PRESETS_PER_BANK: usize = 3;

/// The number of switchable loops.
pub const LOOP_COUNT: usize = 4;

/// The number of bytes the preset table occupies in the persistent store.
pub const TABLE_SIZE: usize = BANK_COUNT * PRESETS_PER_BANK * LOOP_COUNT;

/// The on/off state of every loop, in loop order.
pub type LoopStates = [bool; LOOP_COUNT];

const CELL_OFF: u8 = 0x00;
const CELL_ON: u8 = 0x01;

/// A bank index. Always in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bank(u8);

impl Bank {
    /// Creates a bank from a zero based index, or None if out of range.
    pub fn new(index: usize) -> Option<Bank> {
        (index < BANK_COUNT).then_some(Bank(index as u8))
    }

    /// The zero based index of the bank.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The bank after this one, wrapping to the first bank.
    pub fn next(self) -> Bank {
        Bank(((self.index() + 1) % BANK_COUNT) as u8)
    }

    /// The bank before this one, wrapping to the last bank.
    pub fn prev(self) -> Bank {
        Bank(((self.index() + BANK_COUNT - 1) % BANK_COUNT) as u8)
    }

    /// All banks in order.
    pub fn all() -> impl Iterator<Item = Bank> {
        (0..BANK_COUNT).map(|index| Bank(index as u8))
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// A preset index within a bank. Always in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Preset(u8);

impl Preset {
    /// Creates a preset from a zero based index, or None if out of range.
    pub fn new(index: usize) -> Option<Preset> {
        (index < PRESETS_PER_BANK).then_some(Preset(index as u8))
    }

    /// The zero based index of the preset.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All presets in order.
    pub fn all() -> impl Iterator<Item = Preset> {
        (0..PRESETS_PER_BANK).map(|index| Preset(index as u8))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// A loop index. Always in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loop(u8);

impl Loop {
    /// Creates a loop from a zero based index, or None if out of range.
    pub fn new(index: usize) -> Option<Loop> {
        (index < LOOP_COUNT).then_some(Loop(index as u8))
    }

    /// The zero based index of the loop.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All loops in order.
    pub fn all() -> impl Iterator<Item = Loop> {
        (0..LOOP_COUNT).map(|index| Loop(index as u8))
    }
}

impl fmt::Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// The currently selected bank and preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    bank: Bank,
    preset: Preset,
}

impl Selection {
    pub fn new(bank: Bank, preset: Preset) -> Selection {
        Selection { bank, preset }
    }

    pub fn bank(&self) -> Bank {
        self.bank
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Moves to the next bank, keeping the preset.
    pub fn bank_up(&mut self) {
        self.bank = self.bank.next();
    }

    /// Moves to the previous bank, keeping the preset.
    pub fn bank_down(&mut self) {
        self.bank = self.bank.prev();
    }

    /// Selects the given preset in the current bank.
    pub fn select(&mut self, preset: Preset) {
        self.preset = preset;
    }

    /// The MIDI program number for this selection. This is always computed from the
    /// selection and never stored.
    pub fn program(&self) -> u7 {
        // At most BANK_COUNT * PRESETS_PER_BANK - 1, well within 7 bits.
        u7::from((self.bank.index() * PRESETS_PER_BANK + self.preset.index()) as u8)
    }
}

/// Errors decoding a stored preset table.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    #[error("unexpected preset table length {0}")]
    Length(usize),
    #[error("invalid cell value {value:#04x} at byte {offset}")]
    InvalidCell { offset: usize, value: u8 },
}

/// The bank x preset x loop configuration grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetTable {
    banks: [[LoopStates; PRESETS_PER_BANK]; BANK_COUNT],
}

impl PresetTable {
    /// Gets whether the loop is engaged for the given bank and preset.
    pub fn get(&self, bank: Bank, preset: Preset, lp: Loop) -> bool {
        self.banks[bank.index()][preset.index()][lp.index()]
    }

    /// Gets all loop states for the given bank and preset.
    pub fn row(&self, bank: Bank, preset: Preset) -> LoopStates {
        self.banks[bank.index()][preset.index()]
    }

    /// Replaces all loop states for the given bank and preset.
    pub fn set_all(&mut self, bank: Bank, preset: Preset, states: LoopStates) {
        self.banks[bank.index()][preset.index()] = states;
    }

    /// Encodes the table, bank major, then preset, then loop.
    pub fn to_bytes(&self) -> [u8; TABLE_SIZE] {
        let mut bytes = [CELL_OFF; TABLE_SIZE];
        self.banks
            .iter()
            .flatten()
            .flatten()
            .zip(bytes.iter_mut())
            .for_each(|(cell, byte)| *byte = if *cell { CELL_ON } else { CELL_OFF });
        bytes
    }

    /// Decodes a table produced by to_bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<PresetTable, PresetError> {
        if bytes.len() != TABLE_SIZE {
            return Err(PresetError::Length(bytes.len()));
        }

        let mut table = PresetTable::default();
        for (offset, (cell, value)) in table
            .banks
            .iter_mut()
            .flatten()
            .flatten()
            .zip(bytes.iter().copied())
            .enumerate()
        {
            *cell = match value {
                CELL_OFF => false,
                CELL_ON => true,
                value => return Err(PresetError::InvalidCell { offset, value }),
            };
        }

        Ok(table)
    }

    /// Loads the table from the store. Storage that doesn't hold a valid table (e.g. a
    /// freshly erased device) is reset to all loops off and written back.
    pub fn load_from(store: &dyn Store, offset: usize) -> Result<PresetTable, StoreError> {
        let mut bytes = [0u8; TABLE_SIZE];
        store.read(offset, &mut bytes)?;

        match PresetTable::from_bytes(&bytes) {
            Ok(table) => {
                info!(store = store.name(), "Loaded presets.");
                Ok(table)
            }
            Err(e) => {
                warn!(
                    store = store.name(),
                    err = e.to_string(),
                    "Preset storage is uninitialized, resetting all presets."
                );
                let table = PresetTable::default();
                table.save_to(store, offset)?;
                Ok(table)
            }
        }
    }

    /// Writes the whole table to the store.
    pub fn save_to(&self, store: &dyn Store, offset: usize) -> Result<(), StoreError> {
        store.write(offset, &self.to_bytes())
    }
}

impl fmt::Display for PresetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bank in Bank::all() {
            writeln!(f, "Bank {}:", bank)?;
            for preset in Preset::all() {
                let loops = self
                    .row(bank, preset)
                    .iter()
                    .map(|on| if *on { "on" } else { "off" })
                    .collect::<Vec<&str>>();
                writeln!(f, "  Preset {}: {}", preset, loops.join(" "))?;
            }
        }
        Ok(())
    }
}
