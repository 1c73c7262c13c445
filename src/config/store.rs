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
use std::sync::Arc;

use serde::Deserialize;

const DEFAULT_CAPACITY: usize = 4096;

/// A YAML representation of the preset store.
#[derive(Deserialize, Clone)]
pub struct Store {
    /// The file backing the store. Names starting with "mock" are kept in memory.
    path: String,

    /// Where the preset table starts.
    offset: Option<usize>,

    /// The size of the emulated storage.
    capacity: Option<usize>,
}

impl Store {
    /// Returns the offset of the preset table.
    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Opens the configured store.
    pub fn open(&self) -> Arc<dyn crate::store::Store> {
        crate::store::get_store(&self.path, self.capacity.unwrap_or(DEFAULT_CAPACITY))
    }
}
