//! Error types for host-facing contract violations
//!
//! Losing a round is not an error; it is a normal phase transition.

use thiserror::Error;

use crate::consts::BUTTON_COUNT;

#[derive(Debug, Error)]
pub enum GameError {
    /// The host emitted a button index outside the board
    #[error("button index {0} is out of range (expected 0..{})", BUTTON_COUNT)]
    InvalidButton(usize),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}
