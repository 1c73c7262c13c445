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
use std::path::Path;

use config::{Config, File};
use serde::Deserialize;

use super::{
    error::ConfigError,
    hardware::{Buttons, Display, Loops},
    midi::Midi,
    store::Store,
    timing::Timing,
};

/// The configuration for the pedal.
#[derive(Deserialize, Clone)]
pub struct Pedal {
    /// Where presets are persisted.
    store: Store,
    /// The MIDI device program changes go to.
    midi: Option<Midi>,
    /// The status display.
    display: Display,
    /// The button pins.
    buttons: Buttons,
    /// The loop switch pins.
    loops: Loops,
    /// Press timing.
    #[serde(default)]
    timing: Timing,
}

impl Pedal {
    /// Parse a pedal configuration from a YAML file.
    pub fn deserialize(path: &Path) -> Result<Pedal, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<Pedal>()?)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn midi(&self) -> Option<&Midi> {
        self.midi.as_ref()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    pub fn loops(&self) -> &Loops {
        &self.loops
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

#[cfg(test)]
mod test {
    use std::{error::Error, time::Duration};

    use config::{Config, File, FileFormat};
    use midly::num::u4;

    use crate::config::{
        error::ConfigError,
        hardware::{Display, Pull},
    };

    use super::Pedal;

    fn parse(yaml: &str) -> Result<Pedal, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize::<Pedal>()?)
    }

    const MINIMAL: &str = r#"
        store:
          path: mock-presets
        display:
          kind: console
        buttons:
          bank_up: 22
          bank_down: 23
          presets: [5, 6, 13]
          loops: [19, 26, 16, 20]
        loops:
          pins: [12, 25, 24, 18]
    "#;

    #[test]
    fn minimal_uses_defaults() -> Result<(), Box<dyn Error>> {
        let pedal = parse(MINIMAL)?;

        assert_eq!(0, pedal.store().offset());
        assert!(pedal.midi().is_none());
        assert_eq!(&Display::Console, pedal.display());
        assert_eq!(Pull::Down, pedal.buttons().pull());
        assert_eq!([22, 23, 5, 6, 13, 19, 26, 16, 20], pedal.buttons().pins());
        assert_eq!([12, 25, 24, 18], pedal.loops().pins());

        let timing = pedal.timing().classifier_timing()?;
        assert_eq!(Duration::from_millis(50), timing.debounce);
        assert_eq!(Duration::from_millis(3000), timing.long_press);
        assert_eq!(Duration::from_millis(1), pedal.timing().poll_interval()?);
        Ok(())
    }

    #[test]
    fn full() -> Result<(), Box<dyn Error>> {
        let pedal = parse(
            r#"
            store:
              path: /var/lib/loopswitch/presets.bin
              offset: 64
              capacity: 1024
            midi:
              device: USB MIDI
              channel: 10
            display:
              kind: lcd
              bus: 1
              address: 39
            buttons:
              bank_up: 22
              bank_down: 23
              presets: [5, 6, 13]
              loops: [19, 26, 16, 20]
              pull: up
              active_low: true
            loops:
              pins: [12, 25, 24, 18]
              active_low: true
            timing:
              debounce: 30ms
              long_press: 2s
              poll_interval: 2ms
        "#,
        )?;

        assert_eq!(64, pedal.store().offset());
        let midi = pedal.midi().ok_or("midi should be configured")?;
        assert_eq!("USB MIDI", midi.device());
        assert_eq!(u4::from(9), midi.channel()?);
        assert!(matches!(pedal.display(), Display::Lcd(_)));
        assert_eq!(Pull::Up, pedal.buttons().pull());

        let timing = pedal.timing().classifier_timing()?;
        assert_eq!(Duration::from_millis(30), timing.debounce);
        assert_eq!(Duration::from_secs(2), timing.long_press);
        assert_eq!(Duration::from_millis(2), pedal.timing().poll_interval()?);
        Ok(())
    }

    #[test]
    fn bad_values() -> Result<(), Box<dyn Error>> {
        let pedal = parse(&format!(
            "{}\n        midi:\n          device: x\n          channel: 0\n        timing:\n          debounce: soon\n",
            MINIMAL
        ))?;
        assert!(matches!(
            pedal.midi().ok_or("midi should be configured")?.channel(),
            Err(ConfigError::MidiChannel(0))
        ));
        assert!(matches!(
            pedal.timing().classifier_timing(),
            Err(ConfigError::Duration { .. })
        ));

        let wrong_loop_count = MINIMAL.replace("[12, 25, 24, 18]", "[12, 25, 24]");
        assert!(parse(&wrong_loop_count).is_err());
        Ok(())
    }
}
