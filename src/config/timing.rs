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
use std::time::Duration;

use duration_string::DurationString;
use serde::Deserialize;

use super::error::ConfigError;
use crate::{
    classifier::{self, DEFAULT_DEBOUNCE, DEFAULT_LONG_PRESS},
    pedal::DEFAULT_POLL_INTERVAL,
};

/// A YAML representation of the press timing.
#[derive(Deserialize, Clone, Default)]
pub struct Timing {
    /// Shorter presses are treated as bounce.
    debounce: Option<String>,

    /// Preset buttons held at least this long save instead of select.
    long_press: Option<String>,

    /// How long to wait between control cycles.
    poll_interval: Option<String>,
}

impl Timing {
    /// Returns the classifier timing from the configuration.
    pub fn classifier_timing(&self) -> Result<classifier::Timing, ConfigError> {
        Ok(classifier::Timing {
            debounce: parse_duration(&self.debounce, DEFAULT_DEBOUNCE)?,
            long_press: parse_duration(&self.long_press, DEFAULT_LONG_PRESS)?,
        })
    }

    /// Returns the poll interval from the configuration.
    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.poll_interval, DEFAULT_POLL_INTERVAL)
    }
}

fn parse_duration(value: &Option<String>, default: Duration) -> Result<Duration, ConfigError> {
    match value {
        Some(value) => Ok(DurationString::from_string(value.clone())
            .map_err(|e| ConfigError::Duration {
                value: value.clone(),
                reason: e.to_string(),
            })?
            .into()),
        None => Ok(default),
    }
}
