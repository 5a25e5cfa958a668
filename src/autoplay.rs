//! Headless autoplay host
//!
//! Drives a `GameSession` the way a presentation shell would: a fixed-step
//! clock ticks the session every frame and a simulated player presses the
//! oldest pending light after a random reaction delay. Used for the demo
//! binary and for soak-testing pacing settings.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::settings::Settings;
use crate::sim::{Button, GameEvent, GameSession, LossReason};

/// Simulated player characteristics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotProfile {
    /// Fastest reaction (ms) from a light becoming pressable to the press
    pub reaction_min_ms: u32,
    /// Slowest reaction (ms)
    pub reaction_max_ms: u32,
    /// Probability (0-1) of pressing a wrong button
    pub mistake_chance: f64,
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            reaction_min_ms: 180,
            reaction_max_ms: 320,
            mistake_chance: 0.0,
        }
    }
}

/// Simulated player
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    profile: BotProfile,
    next_press_ms: Option<i64>,
}

impl AutoPlayer {
    pub fn new(seed: u64, profile: BotProfile) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            profile,
            next_press_ms: None,
        }
    }

    /// Decide whether to press a button at `now_ms`
    pub fn update(&mut self, session: &GameSession, now_ms: i64) -> Option<Button> {
        if !session.is_active() || session.fully_matched() {
            self.next_press_ms = None;
            return None;
        }
        let expected = session.pending_lights().next()?;

        let due = match self.next_press_ms {
            Some(due) => due,
            None => {
                let due = now_ms + i64::from(self.reaction_ms());
                self.next_press_ms = Some(due);
                due
            }
        };
        if now_ms < due {
            return None;
        }
        self.next_press_ms = None;

        if self.rng.random_bool(self.mistake_chance()) {
            let offset = self.rng.random_range(1..Button::ALL.len());
            return Some(Button::ALL[(expected.index() + offset) % Button::ALL.len()]);
        }
        Some(expected)
    }

    fn reaction_ms(&mut self) -> u32 {
        let lo = self.profile.reaction_min_ms.min(self.profile.reaction_max_ms);
        let hi = self.profile.reaction_min_ms.max(self.profile.reaction_max_ms);
        self.rng.random_range(lo..=hi)
    }

    fn mistake_chance(&self) -> f64 {
        let chance = self.profile.mistake_chance;
        if chance.is_finite() {
            chance.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Autoplay run parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    pub game_seed: i32,
    pub bot_seed: u64,
    pub profile: BotProfile,
    /// Simulated frame length (ms)
    pub frame_ms: i64,
    /// Stop after this much simulated time even if the round is still going
    pub max_ms: i64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            game_seed: 1,
            bot_seed: 0,
            profile: BotProfile::default(),
            frame_ms: 16,
            max_ms: 10 * 60 * 1000,
        }
    }
}

/// Outcome of an autoplay run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayReport {
    pub seed: i32,
    pub score: u32,
    /// `None` when the run hit `max_ms` with the round still active
    pub loss: Option<LossReason>,
    pub wrong_button: Option<Button>,
    pub lights_revealed: usize,
    pub frames: u64,
    pub elapsed_ms: i64,
}

/// Play one round with a simulated player
pub fn run_autoplay(
    settings: &Settings,
    config: &AutoplayConfig,
) -> Result<AutoplayReport, GameError> {
    let mut session = GameSession::with_settings(settings.clone())?;
    let mut bot = AutoPlayer::new(config.bot_seed, config.profile);
    let frame_ms = config.frame_ms.max(1);

    let mut now = 0;
    session.on_tick(now);
    session.start_new_game(Some(config.game_seed));

    let mut frames = 0;
    let mut loss = None;
    let mut lights_revealed = 0;
    while now <= config.max_ms {
        session.on_tick(now);
        if let Some(button) = bot.update(&session, now) {
            session.on_button_press(button);
        }
        frames += 1;

        for event in session.drain_events() {
            match event {
                GameEvent::LightRevealed { step, .. } => {
                    lights_revealed = lights_revealed.max(step);
                }
                GameEvent::GameLost { reason, .. } => loss = Some(reason),
                _ => {}
            }
        }
        if !session.is_active() {
            break;
        }
        now += frame_ms;
    }

    log::info!(
        "Autoplay finished: score {} after {} ms ({} frames), loss {:?}",
        session.score(),
        now,
        frames,
        loss
    );

    Ok(AutoplayReport {
        seed: session.seed(),
        score: session.score(),
        loss,
        wrong_button: session.wrong_button(),
        lights_revealed,
        frames,
        elapsed_ms: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PacingConfig;

    #[test]
    fn test_autoplay_is_deterministic() {
        let config = AutoplayConfig {
            game_seed: 31337,
            bot_seed: 7,
            profile: BotProfile {
                mistake_chance: 0.01,
                ..Default::default()
            },
            ..Default::default()
        };
        let settings = Settings::default();
        let a = run_autoplay(&settings, &config).unwrap();
        let b = run_autoplay(&settings, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fast_bot_survives_early_game() {
        let config = AutoplayConfig {
            profile: BotProfile {
                reaction_min_ms: 40,
                reaction_max_ms: 80,
                mistake_chance: 0.0,
            },
            max_ms: 30_000,
            ..Default::default()
        };
        let report = run_autoplay(&Settings::default(), &config).unwrap();
        assert_eq!(report.loss, None);
        assert!(report.lights_revealed >= 30, "revealed {}", report.lights_revealed);
        // Only the final light can still be waiting for its press
        assert!(report.score as usize + 1 >= report.lights_revealed);
        assert!(report.score as usize <= report.lights_revealed);
    }

    #[test]
    fn test_clumsy_bot_loses_on_first_press() {
        let config = AutoplayConfig {
            profile: BotProfile {
                mistake_chance: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let report = run_autoplay(&Settings::default(), &config).unwrap();
        assert!(matches!(report.loss, Some(LossReason::WrongButton(_))));
        assert_eq!(report.score, 0);
        assert!(report.wrong_button.is_some());
    }

    #[test]
    fn test_slow_bot_falls_behind() {
        let config = AutoplayConfig {
            profile: BotProfile {
                reaction_min_ms: 4_000,
                reaction_max_ms: 5_000,
                mistake_chance: 0.0,
            },
            ..Default::default()
        };
        let report = run_autoplay(&Settings::default(), &config).unwrap();
        assert_eq!(report.loss, Some(LossReason::FellBehind));
        assert_eq!(report.wrong_button, None);
        assert!(report.elapsed_ms < config.max_ms);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = Settings {
            pacing: PacingConfig {
                fastest_ms: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(run_autoplay(&settings, &AutoplayConfig::default()).is_err());
    }

    #[test]
    fn test_bot_waits_for_reaction_time() {
        let mut session = GameSession::new();
        session.start_new_game(Some(1));
        session.on_tick(0);
        let profile = BotProfile {
            reaction_min_ms: 100,
            reaction_max_ms: 100,
            mistake_chance: 0.0,
        };
        let mut bot = AutoPlayer::new(0, profile);
        assert_eq!(bot.update(&session, 0), None);
        assert_eq!(bot.update(&session, 99), None);
        assert_eq!(bot.update(&session, 100), session.current_lit_button());
    }
}
