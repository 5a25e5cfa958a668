//! Deterministic game engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only ever comes from the host via `on_tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod pacing;
pub mod rng;
pub mod sequence;
pub mod state;
pub mod tick;

pub use pacing::{PacingConfig, PacingTable};
pub use rng::XorShift;
pub use sequence::{Button, first_light, next_light};
pub use state::{GameEvent, GamePhase, GameSession, LossReason, SessionSnapshot};
