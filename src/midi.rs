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
use std::{error::Error, fmt, sync::Arc};

use midly::{
    live::LiveEvent,
    num::{u4, u7},
    MidiMessage,
};

mod midir;
mod mock;

/// A MIDI device that events can be sent to.
pub trait Device: fmt::Display + std::marker::Send + std::marker::Sync {
    /// Returns the name of the device.
    fn name(&self) -> String;

    /// Emits an event.
    fn emit(&self, event: LiveEvent<'static>) -> Result<(), Box<dyn Error>>;
}

/// Creates a program change event.
pub fn program_change(channel: u4, program: u7) -> LiveEvent<'static> {
    LiveEvent::Midi {
        channel,
        message: MidiMessage::ProgramChange { program },
    }
}

/// Lists devices known to midir.
pub fn list_devices() -> Result<Vec<Box<dyn Device>>, Box<dyn Error>> {
    midir::list()
}

/// Gets a device with the given name.
pub fn get_device(name: &str) -> Result<Arc<dyn Device>, Box<dyn Error>> {
    if name.starts_with("mock") {
        return Ok(Arc::new(mock::Device::get(name)));
    };

    Ok(Arc::new(midir::get(name)?))
}

#[cfg(test)]
pub mod test {
    pub use super::mock::Device;
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use midly::num::{u4, u7};

    use super::program_change;

    #[test]
    fn program_change_bytes() -> Result<(), Box<dyn Error>> {
        let mut buf: Vec<u8> = Vec::new();
        program_change(u4::from(0), u7::from(5)).write(&mut buf)?;
        assert_eq!(vec![0xC0, 0x05], buf);

        buf.clear();
        program_change(u4::from(15), u7::from(8)).write(&mut buf)?;
        assert_eq!(vec![0xCF, 0x08], buf);
        Ok(())
    }

    #[test]
    fn mock_devices() -> Result<(), Box<dyn Error>> {
        let device = super::get_device("mock-midi")?;
        assert_eq!("mock-midi", device.name());
        device.emit(program_change(u4::from(0), u7::from(1)))?;
        Ok(())
    }
}
