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
use midly::num::u4;
use serde::Deserialize;

use super::error::ConfigError;

const DEFAULT_MIDI_CHANNEL: u8 = 1;

/// A YAML representation of the MIDI configuration.
#[derive(Deserialize, Clone)]
pub struct Midi {
    /// The MIDI device.
    device: String,

    /// The channel program changes are sent on, 1-16.
    channel: Option<u8>,
}

impl Midi {
    /// Returns the device from the configuration.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the zero based MIDI channel from the configuration.
    pub fn channel(&self) -> Result<u4, ConfigError> {
        let channel = self.channel.unwrap_or(DEFAULT_MIDI_CHANNEL);
        channel
            .checked_sub(1)
            .and_then(u4::try_from)
            .ok_or(ConfigError::MidiChannel(channel))
    }
}
