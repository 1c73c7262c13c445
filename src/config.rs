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
use std::{error::Error, sync::Arc};

use tracing::{info, warn};

use crate::{
    classifier::Classifier,
    clock::SystemClock,
    controller::{Controller, Peripherals},
    presets::PresetTable,
};

mod error;
mod hardware;
mod midi;
mod pedal;
mod store;
mod timing;

pub use error::ConfigError;
pub use pedal::Pedal;

/// Loads the preset table from the configured store.
pub fn load_presets(config: &Pedal) -> Result<PresetTable, Box<dyn Error>> {
    let store = config.store().open();
    Ok(PresetTable::load_from(
        store.as_ref(),
        config.store().offset(),
    )?)
}

/// Replaces the persisted preset table.
pub fn save_presets(config: &Pedal, table: &PresetTable) -> Result<(), Box<dyn Error>> {
    let store = config.store().open();
    table.save_to(store.as_ref(), config.store().offset())?;
    info!(store = store.name(), "Saved preset table.");
    Ok(())
}

/// Opens every peripheral named by the configuration and assembles the pedal.
pub fn init_pedal(config: &Pedal) -> Result<crate::pedal::Pedal, Box<dyn Error>> {
    let store = config.store().open();
    let store_offset = config.store().offset();
    let table = PresetTable::load_from(store.as_ref(), store_offset)?;

    let (midi_device, midi_channel) = match config.midi() {
        Some(midi_config) => (
            Some(crate::midi::get_device(midi_config.device())?),
            midi_config.channel()?,
        ),
        None => {
            warn!("No MIDI device configured, program changes will not be sent.");
            (None, 0.into())
        }
    };

    let peripherals = Peripherals {
        outputs: config.loops().outputs()?,
        display: config.display().open()?,
        midi_device,
        midi_channel,
        store: Arc::clone(&store),
        store_offset,
    };

    Ok(crate::pedal::Pedal::new(
        config.buttons().sampler()?,
        Classifier::new(config.timing().classifier_timing()?),
        Box::new(SystemClock::new()),
        Controller::new(table, peripherals),
    ))
}
