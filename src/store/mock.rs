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
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use parking_lot::Mutex;
use tracing::debug;

use super::{check_range, StoreError, ERASED};

#[cfg(test)]
const DEFAULT_CAPACITY: usize = 256;

/// A mock store. Keeps everything in memory, starting out erased.
#[derive(Clone)]
pub struct MockStore {
    name: String,
    bytes: Arc<Mutex<Vec<u8>>>,
    writes: Arc<AtomicUsize>,
}

impl MockStore {
    /// Gets the given mock store.
    #[cfg(test)]
    pub fn get(name: &str) -> MockStore {
        MockStore::with_capacity(name, DEFAULT_CAPACITY)
    }

    /// Gets a mock store with the given capacity.
    pub fn with_capacity(name: &str, capacity: usize) -> MockStore {
        MockStore {
            name: name.to_string(),
            bytes: Arc::new(Mutex::new(vec![ERASED; capacity])),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Gets the number of writes made to the store.
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Overwrites the store contents without counting a write.
    #[cfg(test)]
    pub fn fill(&self, offset: usize, data: &[u8]) {
        self.bytes.lock()[offset..offset + data.len()].copy_from_slice(data);
    }
}

impl super::Store for MockStore {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), StoreError> {
        let bytes = self.bytes.lock();
        let end = check_range(offset, buf.len(), bytes.len())?;
        buf.copy_from_slice(&bytes[offset..end]);
        Ok(())
    }

    fn write(&self, offset: usize, data: &[u8]) -> Result<(), StoreError> {
        let mut bytes = self.bytes.lock();
        let end = check_range(offset, data.len(), bytes.len())?;
        bytes[offset..end].copy_from_slice(data);
        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(store = self.name, offset, len = data.len(), "Wrote to mock store.");
        Ok(())
    }
}
