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
use std::{io, path::PathBuf, sync::Arc};

mod file;
mod mock;

pub use file::FileStore;

/// The value an erased byte reads as.
pub const ERASED: u8 = 0xFF;

/// Errors reading or writing the persistent store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("range {offset}..{end} is outside of the store capacity {capacity}")]
    OutOfRange {
        offset: usize,
        end: usize,
        capacity: usize,
    },
}

/// A fixed size byte range of non-volatile storage.
pub trait Store: Send + Sync {
    /// Returns the name of the store.
    fn name(&self) -> String;

    /// Fills the buffer with the bytes starting at the offset.
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), StoreError>;

    /// Writes the bytes starting at the offset.
    fn write(&self, offset: usize, data: &[u8]) -> Result<(), StoreError>;
}

/// Checks that the range fits in the capacity and returns its end.
pub(crate) fn check_range(offset: usize, len: usize, capacity: usize) -> Result<usize, StoreError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(end),
        _ => Err(StoreError::OutOfRange {
            offset,
            end: offset.saturating_add(len),
            capacity,
        }),
    }
}

/// Gets a store backed by the given path. Paths starting with "mock" give an in-memory store.
pub fn get_store(path: &str, capacity: usize) -> Arc<dyn Store> {
    if path.starts_with("mock") {
        return Arc::new(mock::MockStore::with_capacity(path, capacity));
    }

    Arc::new(FileStore::new(PathBuf::from(path), capacity))
}
