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

use midly::num::u4;
use tracing::{debug, error, info, span, Level};

use crate::{
    classifier::Action,
    display::{self, Display},
    midi,
    outputs::Outputs,
    presets::{Loop, PresetTable, Selection},
    store::Store,
};

/// Everything the controller drives.
pub struct Peripherals {
    /// The loop switch lines.
    pub outputs: Arc<dyn Outputs>,
    /// The status display.
    pub display: Arc<dyn Display>,
    /// Where program changes are sent. Nothing is sent if this is None.
    pub midi_device: Option<Arc<dyn midi::Device>>,
    /// The channel program changes are sent on.
    pub midi_channel: u4,
    /// Where the preset table is persisted.
    pub store: Arc<dyn Store>,
    /// The offset of the preset table in the store.
    pub store_offset: usize,
}

/// Owns the selection and the preset table, and applies actions to them.
pub struct Controller {
    table: PresetTable,
    selection: Selection,
    peripherals: Peripherals,
}

impl Controller {
    /// Creates a new controller at the first bank and preset.
    pub fn new(table: PresetTable, peripherals: Peripherals) -> Controller {
        Controller {
            table,
            selection: Selection::default(),
            peripherals,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn table(&self) -> &PresetTable {
        &self.table
    }

    /// Brings the display, loops and MIDI devices in line with the current selection.
    pub fn start(&self) {
        let span = span!(Level::INFO, "controller");
        let _enter = span.enter();

        info!(
            bank = self.selection.bank().to_string(),
            preset = self.selection.preset().to_string(),
            "Controller started."
        );
        self.refresh_display();
        self.apply_preset();
    }

    /// Applies a classified action.
    pub fn apply(&mut self, action: Action) {
        let span = span!(Level::INFO, "controller");
        let _enter = span.enter();

        info!(action = action.to_string(), "Applying action.");

        match action {
            Action::BankUp => {
                self.selection.bank_up();
                self.selection_changed();
            }
            Action::BankDown => {
                self.selection.bank_down();
                self.selection_changed();
            }
            Action::SelectPreset(preset) => {
                self.selection.select(preset);
                self.selection_changed();
            }
            Action::SaveCurrentPreset => self.save_current_preset(),
            Action::ToggleLoop(lp) => self.toggle_loop(lp),
        }
    }

    fn selection_changed(&self) {
        self.apply_preset();
        self.refresh_display();
    }

    /// Drives the loops to the stored preset and sends the program change.
    fn apply_preset(&self) {
        let states = self
            .table
            .row(self.selection.bank(), self.selection.preset());
        self.peripherals.outputs.apply(states);

        let program = self.selection.program();
        info!(
            bank = self.selection.bank().to_string(),
            preset = self.selection.preset().to_string(),
            program = program.as_int(),
            loops = format!("{:?}", states),
            "Applied preset."
        );

        match &self.peripherals.midi_device {
            Some(midi_device) => {
                let event = midi::program_change(self.peripherals.midi_channel, program);
                if let Err(e) = midi_device.emit(event) {
                    error!(err = e.as_ref(), "Error sending program change.");
                }
            }
            None => debug!("No MIDI device configured, not sending program change."),
        }
    }

    fn refresh_display(&self) {
        if let Err(e) = display::show_selection(self.peripherals.display.as_ref(), &self.selection)
        {
            error!(err = e.to_string(), "Error updating display.");
        }
    }

    /// Captures the live loop states into the current preset and persists the table.
    fn save_current_preset(&mut self) {
        let states = self.peripherals.outputs.snapshot();
        self.table
            .set_all(self.selection.bank(), self.selection.preset(), states);

        let message = match self.table.save_to(
            self.peripherals.store.as_ref(),
            self.peripherals.store_offset,
        ) {
            Ok(()) => {
                info!(
                    bank = self.selection.bank().to_string(),
                    preset = self.selection.preset().to_string(),
                    loops = format!("{:?}", states),
                    "Saved preset."
                );
                display::SAVED_MESSAGE
            }
            Err(e) => {
                error!(
                    store = self.peripherals.store.name(),
                    err = e.to_string(),
                    "Error saving presets."
                );
                display::SAVE_FAILED_MESSAGE
            }
        };

        if let Err(e) = display::show_message(self.peripherals.display.as_ref(), message) {
            error!(err = e.to_string(), "Error updating display.");
        }
    }

    /// Flips the live state of a loop. The stored presets are left alone.
    fn toggle_loop(&self, lp: Loop) {
        let on = !self.peripherals.outputs.read(lp);
        self.peripherals.outputs.write(lp, on);
        info!(loop_number = lp.to_string(), on, "Toggled loop.");
    }
}
