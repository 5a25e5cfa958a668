//! Clock tick and button press handling
//!
//! The host calls `on_tick` at its own cadence (typically once per frame) and
//! `on_button_press` whenever the player hits a button. Both run on the
//! caller's thread; nothing here sleeps or schedules.

use super::sequence::{Button, first_light, next_light};
use super::state::{GameEvent, GamePhase, GameSession, LossReason};

impl GameSession {
    /// Advance the session to host time `now_ms`, revealing at most one light.
    ///
    /// Outside a running round (Idle or Lost) a tick only records `now_ms`;
    /// that time becomes the start time, and the default seed, of the next
    /// game started by a press or `start_new_game(None)`.
    pub fn on_tick(&mut self, now_ms: i64) {
        self.clock_ms = now_ms;

        if self.phase != GamePhase::Active {
            return;
        }

        // Just started, or the previous light is about to be replaced
        if self.sequence.is_empty() {
            self.reveal_light();
            return;
        }

        if self.sequence.len() >= self.settings.loss_threshold {
            self.lose(LossReason::FellBehind);
            return;
        }

        let elapsed = now_ms.saturating_sub(self.start_ms);
        let due = self.pacing.index_for_elapsed(elapsed as f64);
        if due > self.revealed_steps {
            self.reveal_light();
        }
    }

    /// Handle a press. Outside a running round any press starts a new game.
    pub fn on_button_press(&mut self, button: Button) {
        if self.phase != GamePhase::Active {
            self.start_new_game(None);
            return;
        }

        let Some(&expected) = self.sequence.front() else {
            log::trace!("Ignoring press of {} with no lit button", button);
            return;
        };

        if button != expected {
            self.wrong_button = Some(button);
            self.lose(LossReason::WrongButton(button));
            return;
        }

        if self.fully_matched {
            log::trace!("Ignoring repeat press of {}", button);
            return;
        }

        self.score += 1;
        if self.sequence.len() > 1 {
            self.sequence.pop_front();
        } else {
            self.fully_matched = true;
            self.record(GameEvent::SequenceCleared);
        }

        log::debug!("Pressed {} correctly, score {}", button, self.score);
        self.record(GameEvent::Scored { score: self.score });
    }

    fn reveal_light(&mut self) {
        let button = match self.sequence.back() {
            Some(&previous) => next_light(&mut self.rng, previous),
            None => first_light(&mut self.rng),
        };

        // A fully matched run starts a fresh replay chain
        if self.fully_matched {
            self.sequence.clear();
        }
        self.sequence.push_back(button);
        self.revealed_steps += 1;
        self.fully_matched = false;

        log::debug!(
            "Revealed light {} (step {}, {} pending)",
            button,
            self.revealed_steps,
            self.sequence.len()
        );
        self.record(GameEvent::LightRevealed {
            button,
            step: self.revealed_steps,
        });
    }
}
