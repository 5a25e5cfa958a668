//! Game session state and lifecycle
//!
//! A `GameSession` owns everything one player's game needs: the seeded
//! generator, the pending light buffer, score and loss markers. Clock ticks
//! and button presses (see `tick.rs`) are the only inputs that mutate it.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::pacing::{PacingConfig, PacingTable};
use super::rng::XorShift;
use super::sequence::Button;
use crate::error::GameError;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No round has been played yet
    #[default]
    Idle,
    /// Round in progress
    Active,
    /// Round over; score and wrong button stay readable
    Lost,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Pressed a button other than the next pending light
    WrongButton(Button),
    /// Too many unpressed lights piled up
    FellBehind,
}

/// Undrained events kept per session; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Gameplay events, drained by the host for feedback (sounds, toasts, logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { seed: i32 },
    LightRevealed { button: Button, step: usize },
    Scored { score: u32 },
    /// Player pressed through to the end of the revealed run
    SequenceCleared,
    GameLost { reason: LossReason, score: u32 },
}

/// Observable state for rendering and diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub seed: i32,
    pub score: u32,
    pub lit_button: Option<Button>,
    pub wrong_button: Option<Button>,
    pub pending: Vec<Button>,
    pub revealed_steps: usize,
    pub fully_matched: bool,
}

/// One player's game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(super) settings: Settings,
    pub(super) pacing: Arc<PacingTable>,
    pub(super) phase: GamePhase,
    pub(super) seed: i32,
    pub(super) rng: XorShift,
    pub(super) score: u32,
    /// Host time (ms) when the current round started
    pub(super) start_ms: i64,
    /// Most recent host time seen
    pub(super) clock_ms: i64,
    /// Pending lights, oldest unpressed first
    pub(super) sequence: VecDeque<Button>,
    pub(super) revealed_steps: usize,
    pub(super) wrong_button: Option<Button>,
    /// Last light of the revealed run was pressed; it stays in `sequence`
    /// as the previous light for the next reveal
    pub(super) fully_matched: bool,
    pub(super) events: VecDeque<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Idle session with the default settings and shared pacing table
    pub fn new() -> Self {
        Self::build(Settings::default(), PacingTable::shared())
    }

    /// Idle session with custom settings
    pub fn with_settings(settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;
        let pacing = if settings.pacing == PacingConfig::default() {
            PacingTable::shared()
        } else {
            Arc::new(PacingTable::new(settings.pacing))
        };
        Ok(Self::build(settings, pacing))
    }

    fn build(settings: Settings, pacing: Arc<PacingTable>) -> Self {
        let capacity = settings.loss_threshold;
        Self {
            settings,
            pacing,
            phase: GamePhase::Idle,
            seed: 0,
            rng: XorShift::new(0),
            score: 0,
            start_ms: 0,
            clock_ms: 0,
            sequence: VecDeque::with_capacity(capacity),
            revealed_steps: 0,
            wrong_button: None,
            fully_matched: false,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    /// Start a fresh round at the most recent host time.
    ///
    /// Without an explicit seed the round is seeded from that time, truncated
    /// to 32 bits.
    pub fn start_new_game(&mut self, seed: Option<i32>) {
        let seed = seed.unwrap_or(self.clock_ms as i32);
        self.phase = GamePhase::Active;
        self.seed = seed;
        self.rng = XorShift::new(seed);
        self.score = 0;
        self.start_ms = self.clock_ms;
        self.sequence.clear();
        self.revealed_steps = 0;
        self.wrong_button = None;
        self.fully_matched = false;

        log::info!("New game started with seed {} at {} ms", seed, self.start_ms);
        self.record(GameEvent::GameStarted { seed });
    }

    /// End the round. Score and wrong button are left for the host to show.
    pub(super) fn lose(&mut self, reason: LossReason) {
        self.phase = GamePhase::Lost;
        self.fully_matched = false;
        self.sequence.clear();
        self.revealed_steps = 0;

        log::info!("Game lost ({:?}) with score {}", reason, self.score);
        self.record(GameEvent::GameLost {
            reason,
            score: self.score,
        });
    }

    /// Append to the event log, dropping the oldest entry when it is full
    pub(super) fn record(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pacing(&self) -> &PacingTable {
        &self.pacing
    }

    /// Most recently revealed light while a round is running
    pub fn current_lit_button(&self) -> Option<Button> {
        if self.is_active() {
            self.sequence.back().copied()
        } else {
            None
        }
    }

    pub fn wrong_button(&self) -> Option<Button> {
        self.wrong_button
    }

    /// Number of lights in the pending buffer
    pub fn sequence_depth(&self) -> usize {
        self.sequence.len()
    }

    /// Pending lights, oldest unpressed first
    pub fn pending_lights(&self) -> impl Iterator<Item = Button> + '_ {
        self.sequence.iter().copied()
    }

    pub fn revealed_steps(&self) -> usize {
        self.revealed_steps
    }

    pub fn fully_matched(&self) -> bool {
        self.fully_matched
    }

    /// Take the events recorded since the last drain, oldest first.
    ///
    /// Hosts that only read the observers never need to call this: the log
    /// keeps at most `MAX_PENDING_EVENTS` entries and drops the oldest.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            seed: self.seed,
            score: self.score,
            lit_button: self.current_lit_button(),
            wrong_button: self.wrong_button,
            pending: self.sequence.iter().copied().collect(),
            revealed_steps: self.revealed_steps,
            fully_matched: self.fully_matched,
        }
    }
}
