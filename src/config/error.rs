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

/// Errors reading the pedal configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error loading config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid duration {value}: {reason}")]
    Duration { value: String, reason: String },

    #[error("invalid MIDI channel {0}, must be between 1 and 16")]
    MidiChannel(u8),
}
