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
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tracing::{info, span, Level};

use crate::{
    buttons::Sampler,
    classifier::{Action, Classifier},
    clock::Clock,
    controller::Controller,
};

/// The default time between control cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// The whole pedal: buttons in, loops, display and MIDI out.
pub struct Pedal {
    sampler: Box<dyn Sampler>,
    classifier: Classifier,
    clock: Box<dyn Clock>,
    controller: Controller,
}

impl Pedal {
    pub fn new(
        sampler: Box<dyn Sampler>,
        classifier: Classifier,
        clock: Box<dyn Clock>,
        controller: Controller,
    ) -> Pedal {
        Pedal {
            sampler,
            classifier,
            clock,
            controller,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Applies the current selection to the outputs and display.
    pub fn start(&self) {
        self.controller.start();
    }

    /// Runs one control cycle: sample the buttons, advance the classifier and apply the
    /// resulting action, if any.
    pub fn cycle(&mut self) -> Option<Action> {
        let samples = self.sampler.sample();
        let action = self.classifier.advance(&samples, self.clock.now())?;
        self.controller.apply(action);
        Some(action)
    }

    /// Runs control cycles until shutdown is set.
    pub fn run(&mut self, poll_interval: Duration, shutdown: Arc<AtomicBool>) {
        let span = span!(Level::INFO, "pedal");
        let _enter = span.enter();

        info!(?poll_interval, "Pedal started.");
        self.start();

        while !shutdown.load(Ordering::Relaxed) {
            self.cycle();
            spin_sleep::sleep(poll_interval);
        }

        info!("Pedal stopped.");
    }
}

#[cfg(test)]
mod test {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        thread,
        time::Duration,
    };

    use midly::num::u4;

    use crate::{
        buttons::{test::MockSampler, Button},
        classifier::{Action, Classifier},
        clock::test::ManualClock,
        controller::{Controller, Peripherals},
        display::{test::MockDisplay, MESSAGE_ROW, SAVED_MESSAGE},
        midi,
        outputs::test::MockOutputs,
        presets::{Bank, Loop, Preset, PresetTable},
        store::test::MockStore,
        test::eventually,
    };

    use super::Pedal;

    struct Harness {
        pedal: Pedal,
        sampler: MockSampler,
        clock: ManualClock,
        outputs: MockOutputs,
        display: MockDisplay,
        midi_device: midi::test::Device,
        store: MockStore,
    }

    fn harness() -> Harness {
        let sampler = MockSampler::new();
        let clock = ManualClock::new();
        let outputs = MockOutputs::new();
        let display = MockDisplay::new();
        let midi_device = midi::test::Device::get("mock-midi");
        let store = MockStore::get("mock-store");
        let controller = Controller::new(
            PresetTable::default(),
            Peripherals {
                outputs: Arc::new(outputs.clone()),
                display: Arc::new(display.clone()),
                midi_device: Some(Arc::new(midi_device.clone())),
                midi_channel: u4::from(0),
                store: Arc::new(store.clone()),
                store_offset: 0,
            },
        );
        let pedal = Pedal::new(
            Box::new(sampler.clone()),
            Classifier::default(),
            Box::new(clock.clone()),
            controller,
        );
        Harness {
            pedal,
            sampler,
            clock,
            outputs,
            display,
            midi_device,
            store,
        }
    }

    impl Harness {
        /// Holds the button for the given time, one cycle per millisecond, and returns the
        /// actions applied along the way.
        fn hold(&mut self, button: Button, millis: u64) -> Vec<Action> {
            let mut actions = Vec::new();
            self.sampler.press(button);
            for _ in 0..millis {
                actions.extend(self.pedal.cycle());
                self.clock.advance(Duration::from_millis(1));
            }
            self.sampler.release(button);
            actions.extend(self.pedal.cycle());
            actions
        }
    }

    #[test]
    fn toggle_save_then_select() {
        let mut h = harness();
        h.pedal.start();
        assert_eq!([false; 4], h.outputs.states());

        let loop3 = Loop::new(2).expect("loop");
        assert_eq!(vec![Action::ToggleLoop(loop3)], h.hold(Button::Loop3, 80));
        assert_eq!([false, false, true, false], h.outputs.states());

        assert_eq!(vec![Action::SaveCurrentPreset], h.hold(Button::Preset1, 3200));
        let first = (Bank::new(0).expect("bank"), Preset::new(0).expect("preset"));
        assert_eq!(
            [false, false, true, false],
            h.pedal.controller().table().row(first.0, first.1)
        );
        assert_eq!(SAVED_MESSAGE, h.display.line(MESSAGE_ROW));
        assert_eq!(1, h.store.write_count());

        let second = Preset::new(1).expect("preset");
        assert_eq!(
            vec![Action::SelectPreset(second)],
            h.hold(Button::Preset2, 100)
        );
        assert_eq!([false; 4], h.outputs.states());
        assert_eq!(Some(vec![0xC0, 1]), h.midi_device.get_emitted_event());
    }

    #[test]
    fn bounces_do_nothing() {
        let mut h = harness();
        h.pedal.start();
        h.midi_device.reset_emitted_events();

        for button in [Button::BankUp, Button::Preset3, Button::Loop1] {
            assert!(h.hold(button, 20).is_empty());
        }
        assert_eq!([false; 4], h.outputs.states());
        assert!(h.midi_device.get_emitted_events().is_empty());
        assert_eq!(Bank::new(0), Some(h.pedal.controller().selection().bank()));
    }

    #[test]
    fn run_until_shutdown() {
        let h = harness();
        let mut pedal = Pedal::new(
            Box::new(h.sampler.clone()),
            Classifier::default(),
            // Every cycle reads the clock once, so each cycle is 10ms of pedal time.
            Box::new(ManualClock::with_step(Duration::from_millis(10))),
            h.pedal.controller,
        );
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = {
            let shutdown = shutdown.clone();
            thread::spawn(move || {
                pedal.run(Duration::from_millis(1), shutdown);
                pedal
            })
        };

        eventually(
            || h.display.line(0) == "Bank: 1",
            "Pedal never showed the first bank",
        );
        h.sampler.press(Button::BankUp);
        thread::sleep(Duration::from_millis(200));
        assert_eq!("Bank: 1", h.display.line(0));

        h.sampler.release(Button::BankUp);
        eventually(
            || h.display.line(0) == "Bank: 2",
            "Pedal never moved to the second bank",
        );

        shutdown.store(true, Ordering::Relaxed);
        let pedal = handle.join().expect("pedal thread panicked");
        assert_eq!(Bank::new(1), Some(pedal.controller().selection().bank()));
    }
}
