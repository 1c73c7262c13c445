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
use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::PathBuf,
};

use parking_lot::Mutex;
use tracing::{debug, info};

use super::{check_range, StoreError, ERASED};

/// A store that emulates an EEPROM of fixed capacity with a file. Bytes that haven't
/// been written yet read as erased.
pub struct FileStore {
    path: PathBuf,
    capacity: usize,
    /// Serializes access to the file.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf, capacity: usize) -> FileStore {
        FileStore {
            path,
            capacity,
            lock: Mutex::new(()),
        }
    }

    /// Opens the backing file for writing, creating it erased if it doesn't exist.
    fn open_for_write(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;

        let len = file.metadata()?.len() as usize;
        if len < self.capacity {
            info!(
                path = self.path.display().to_string(),
                capacity = self.capacity,
                "Initializing store file."
            );
            file.seek(SeekFrom::Start(len as u64))?;
            file.write_all(&vec![ERASED; self.capacity - len])?;
        }

        Ok(file)
    }
}

impl super::Store for FileStore {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), StoreError> {
        check_range(offset, buf.len(), self.capacity)?;
        let _guard = self.lock.lock();

        buf.fill(ERASED);
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = self.name(), "Store file doesn't exist yet.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        file.seek(SeekFrom::Start(offset as u64))?;
        // A short file leaves the rest of the buffer erased.
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..])? {
                0 => break,
                n => filled += n,
            }
        }

        Ok(())
    }

    fn write(&self, offset: usize, data: &[u8]) -> Result<(), StoreError> {
        check_range(offset, data.len(), self.capacity)?;
        let _guard = self.lock.lock();

        let mut file = self.open_for_write()?;
        file.seek(SeekFrom::Start(offset as u64))?;
        file.write_all(data)?;
        file.sync_all()?;

        debug!(path = self.name(), offset, len = data.len(), "Wrote to store.");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::error::Error;

    use crate::store::{Store, StoreError, ERASED};

    use super::FileStore;

    #[test]
    fn missing_file_reads_erased() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("presets.bin"), 64);

        let mut buf = [0u8; 8];
        store.read(4, &mut buf)?;
        assert_eq!([ERASED; 8], buf);
        Ok(())
    }

    #[test]
    fn write_then_read() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("state").join("presets.bin");
        let store = FileStore::new(path.clone(), 64);

        store.write(10, &[0, 1, 1, 0])?;
        assert_eq!(64, std::fs::metadata(&path)?.len());

        let mut buf = [0u8; 6];
        store.read(9, &mut buf)?;
        assert_eq!([ERASED, 0, 1, 1, 0, ERASED], buf);

        // A fresh instance sees the same contents.
        let store = FileStore::new(path, 64);
        let mut buf = [0u8; 4];
        store.read(10, &mut buf)?;
        assert_eq!([0, 1, 1, 0], buf);
        Ok(())
    }

    #[test]
    fn short_file_reads_erased_tail() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("presets.bin");
        std::fs::write(&path, [0u8, 1])?;
        let store = FileStore::new(path, 64);

        let mut buf = [0u8; 4];
        store.read(0, &mut buf)?;
        assert_eq!([0, 1, ERASED, ERASED], buf);
        Ok(())
    }

    #[test]
    fn out_of_range() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("presets.bin"), 16);

        assert!(matches!(
            store.write(12, &[0; 8]),
            Err(StoreError::OutOfRange { .. })
        ));
        assert!(!dir.path().join("presets.bin").exists());
        Ok(())
    }
}
