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

//! Turns raw button samples into user actions.
//!
//! Only one button is tracked at a time. A press is classified when the tracked button
//! is released, so the full hold time is known before deciding between a tap and a hold:
//!
//! - held for less than the debounce time: noise, nothing happens.
//! - preset buttons held for at least the long press time: save the current preset.
//! - anything else: the button's normal action.

use std::{fmt, time::Duration};

use tracing::debug;

use crate::{
    buttons::{Button, Samples},
    presets::{Loop, Preset},
};

/// The minimum hold time for a press to count.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// The minimum hold time on a preset button to save instead of select.
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(3000);

/// A classified user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Moves to the next bank, wrapping around.
    BankUp,

    /// Moves to the previous bank, wrapping around.
    BankDown,

    /// Selects a preset in the current bank.
    SelectPreset(Preset),

    /// Stores the live loop states into the current preset.
    SaveCurrentPreset,

    /// Flips a loop without touching the stored presets.
    ToggleLoop(Loop),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::BankUp => write!(f, "bank up"),
            Action::BankDown => write!(f, "bank down"),
            Action::SelectPreset(preset) => write!(f, "select preset {}", preset),
            Action::SaveCurrentPreset => write!(f, "save current preset"),
            Action::ToggleLoop(lp) => write!(f, "toggle loop {}", lp),
        }
    }
}

/// Press timing thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub debounce: Duration,
    pub long_press: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            debounce: DEFAULT_DEBOUNCE,
            long_press: DEFAULT_LONG_PRESS,
        }
    }
}

/// The classifier state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// No button is being tracked.
    #[default]
    Idle,

    /// A button went down at the given time and hasn't been released yet.
    Tracking { button: Button, since: Duration },
}

/// The press classifier.
pub struct Classifier {
    timing: Timing,
    state: State,
}

impl Classifier {
    pub fn new(timing: Timing) -> Classifier {
        Classifier {
            timing,
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Advances the classifier with one cycle's samples. Returns an action only on the
    /// release of the tracked button, and at most one per call.
    pub fn advance(&mut self, samples: &Samples, now: Duration) -> Option<Action> {
        match self.state {
            State::Idle => {
                if let Some(button) = samples.first_pressed() {
                    debug!(button = button.to_string(), "Tracking button.");
                    self.state = State::Tracking { button, since: now };
                }
                None
            }
            State::Tracking { button, .. } if samples.is_pressed(button) => None,
            State::Tracking { button, since } => {
                self.state = State::Idle;
                self.classify(button, now.saturating_sub(since))
            }
        }
    }

    fn classify(&self, button: Button, held: Duration) -> Option<Action> {
        if held < self.timing.debounce {
            debug!(button = button.to_string(), ?held, "Ignoring bounce.");
            return None;
        }

        let action = match button {
            Button::BankUp => Action::BankUp,
            Button::BankDown => Action::BankDown,
            _ => match (button.preset(), button.loop_index()) {
                (Some(_), _) if held >= self.timing.long_press => Action::SaveCurrentPreset,
                (Some(preset), _) => Action::SelectPreset(preset),
                (_, Some(lp)) => Action::ToggleLoop(lp),
                _ => return None,
            },
        };

        debug!(
            button = button.to_string(),
            ?held,
            action = action.to_string(),
            "Classified press."
        );
        Some(action)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(Timing::default())
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::{
        buttons::{Button, Samples, SCAN_ORDER},
        presets::{Loop, Preset},
    };

    use super::{Action, Classifier, State};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// Presses the button at start and releases it after held, returning every action produced.
    fn press(
        classifier: &mut Classifier,
        button: Button,
        start: Duration,
        held: Duration,
    ) -> Vec<Action> {
        let down = Samples::pressed(&[button]);
        let mut actions = Vec::new();
        actions.extend(classifier.advance(&down, start));
        actions.extend(classifier.advance(&down, start + held / 2));
        actions.extend(classifier.advance(&Samples::default(), start + held));
        actions
    }

    #[test]
    fn bounce_is_ignored() {
        for button in SCAN_ORDER {
            for held in [0, 1, 10, 49] {
                let mut classifier = Classifier::default();
                assert!(press(&mut classifier, button, ms(1000), ms(held)).is_empty());
                assert_eq!(State::Idle, classifier.state());
            }
        }
    }

    #[test]
    fn bank_and_loop_buttons_have_no_long_press() {
        let cases = [
            (Button::BankUp, Action::BankUp),
            (Button::BankDown, Action::BankDown),
            (Button::Loop1, Action::ToggleLoop(Loop::new(0).expect("loop"))),
            (Button::Loop4, Action::ToggleLoop(Loop::new(3).expect("loop"))),
        ];

        for (button, expected) in cases {
            for held in [50, 51, 2999, 3000, 60_000] {
                let mut classifier = Classifier::default();
                assert_eq!(
                    vec![expected],
                    press(&mut classifier, button, ms(5), ms(held)),
                    "{} held for {}ms",
                    button,
                    held
                );
            }
        }
    }

    #[test]
    fn preset_tap_selects_and_hold_saves() {
        let preset = Preset::new(1).expect("preset");
        for held in [50, 100, 2999] {
            let mut classifier = Classifier::default();
            assert_eq!(
                vec![Action::SelectPreset(preset)],
                press(&mut classifier, Button::Preset2, ms(0), ms(held))
            );
        }
        for held in [3000, 3200, 10_000] {
            let mut classifier = Classifier::default();
            assert_eq!(
                vec![Action::SaveCurrentPreset],
                press(&mut classifier, Button::Preset2, ms(0), ms(held))
            );
        }
    }

    #[test]
    fn classifies_on_release_only() {
        let mut classifier = Classifier::default();
        let down = Samples::pressed(&[Button::Preset1]);

        assert_eq!(None, classifier.advance(&down, ms(0)));
        assert_eq!(
            State::Tracking {
                button: Button::Preset1,
                since: ms(0)
            },
            classifier.state()
        );
        // Held well past both thresholds with no release, nothing is produced.
        for t in (100..20_000).step_by(100) {
            assert_eq!(None, classifier.advance(&down, ms(t)));
        }
        assert_eq!(
            Some(Action::SaveCurrentPreset),
            classifier.advance(&Samples::default(), ms(20_000))
        );
        assert_eq!(None, classifier.advance(&Samples::default(), ms(20_001)));
    }

    #[test]
    fn first_button_in_scan_order_wins() {
        let mut classifier = Classifier::default();
        let both = Samples::pressed(&[Button::Loop2, Button::Preset3]);

        assert_eq!(None, classifier.advance(&both, ms(0)));
        assert_eq!(
            State::Tracking {
                button: Button::Preset3,
                since: ms(0)
            },
            classifier.state()
        );

        // Releasing the other button doesn't matter.
        let preset_only = Samples::pressed(&[Button::Preset3]);
        assert_eq!(None, classifier.advance(&preset_only, ms(60)));

        // Loop 2 goes down again while preset 3 is still held and stays down after the release.
        let loop_only = Samples::pressed(&[Button::Loop2]);
        assert_eq!(
            Some(Action::SelectPreset(Preset::new(2).expect("preset"))),
            classifier.advance(&loop_only, ms(100))
        );

        // The deferred button is picked up on the next cycle, timed from then.
        assert_eq!(None, classifier.advance(&loop_only, ms(110)));
        assert_eq!(
            State::Tracking {
                button: Button::Loop2,
                since: ms(110)
            },
            classifier.state()
        );
        assert_eq!(None, classifier.advance(&Samples::default(), ms(140)));
        assert_eq!(State::Idle, classifier.state());
    }

    #[test]
    fn custom_timing() {
        let mut classifier = Classifier::new(super::Timing {
            debounce: ms(10),
            long_press: ms(500),
        });
        assert_eq!(
            vec![Action::BankDown],
            press(&mut classifier, Button::BankDown, ms(0), ms(10))
        );
        assert_eq!(
            vec![Action::SaveCurrentPreset],
            press(&mut classifier, Button::Preset1, ms(100), ms(500))
        );
    }
}
