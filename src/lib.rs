//! Nopeustesti - a four-light reaction speed memory game
//!
//! Core modules:
//! - `sim`: Deterministic engine (light generator, pacing curve, game session)
//! - `settings`: Data-driven pacing and loss tuning
//! - `autoplay`: Headless host that drives a session with a simulated player
//!
//! Rendering, input devices and audio belong to the host. The host feeds the
//! session clock ticks and button presses and reads back its observable state.

pub mod autoplay;
pub mod error;
pub mod settings;
pub mod sim;

pub use autoplay::{AutoPlayer, AutoplayConfig, AutoplayReport, BotProfile, run_autoplay};
pub use error::GameError;
pub use settings::Settings;
pub use sim::{Button, GameEvent, GamePhase, GameSession, LossReason, PacingConfig, PacingTable};

/// Game configuration constants
pub mod consts {
    /// Number of lights/buttons on the board
    pub const BUTTON_COUNT: u8 = 4;

    /// Number of presses from the start of the game before the pacing table runs out
    pub const SEQUENCE_LENGTH: usize = 200;
    /// Time in milliseconds between lights when the game starts
    pub const STEP_SLOWEST_MS: f64 = 2000.0;
    /// Fastest time in milliseconds between lights
    pub const STEP_FASTEST_MS: f64 = 220.0;

    /// Unpressed lights allowed to pile up before the round is lost
    pub const LOSS_THRESHOLD: usize = 20;
}
