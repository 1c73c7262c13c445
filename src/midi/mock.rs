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

use midly::live::LiveEvent;
use parking_lot::Mutex;
use tracing::info;

/// A mock device. Doesn't actually send anything.
#[derive(Clone)]
pub struct Device {
    name: String,
    emitted: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Device {
    /// Gets the given mock device.
    pub fn get(name: &str) -> Device {
        Device {
            name: name.to_string(),
            emitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[cfg(test)]
    /// Gets the last event emitted.
    pub fn get_emitted_event(&self) -> Option<Vec<u8>> {
        self.emitted.lock().last().cloned()
    }

    #[cfg(test)]
    /// Gets every event emitted so far.
    pub fn get_emitted_events(&self) -> Vec<Vec<u8>> {
        self.emitted.lock().clone()
    }

    #[cfg(test)]
    /// Forgets all emitted events.
    pub fn reset_emitted_events(&self) {
        self.emitted.lock().clear();
    }
}

impl super::Device for Device {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn emit(&self, event: LiveEvent<'static>) -> Result<(), Box<dyn Error>> {
        let mut buf: Vec<u8> = Vec::with_capacity(8);
        event.write(&mut buf)?;
        info!(
            device = self.name,
            event = format!("{:?}", event),
            "Emitting event (mock)."
        );
        self.emitted.lock().push(buf);
        Ok(())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Mock)", self.name)
    }
}
