//! Nopeustesti autoplay entry point
//!
//! Runs one headless round with a simulated player and prints the report as
//! JSON. Set `RUST_LOG=debug` to watch every light and press.

use std::path::PathBuf;

use clap::Parser;

use nopeustesti::{AutoplayConfig, BotProfile};

#[derive(Parser, Debug)]
#[command(name = "nopeustesti")]
#[command(about = "Play a headless Nopeustesti round with a simulated player")]
struct Cli {
    /// Seed for the light sequence (defaults to the current time in ms, truncated to 32 bits)
    #[arg(long, allow_negative_numbers = true)]
    game_seed: Option<i32>,
    /// Seed for the simulated player's reaction times and mistakes
    #[arg(long, default_value_t = 0)]
    bot_seed: u64,
    /// JSON settings file overriding pacing and loss threshold
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Simulated frame length in ms
    #[arg(long, default_value_t = 16)]
    frame_ms: i64,
    /// Stop after this much simulated time (ms)
    #[arg(long, default_value_t = 600_000)]
    max_ms: i64,
    /// Fastest player reaction in ms
    #[arg(long, default_value_t = 180)]
    reaction_min_ms: u32,
    /// Slowest player reaction in ms
    #[arg(long, default_value_t = 320)]
    reaction_max_ms: u32,
    /// Probability (0-1) of the player pressing a wrong button
    #[arg(long, default_value_t = 0.0)]
    mistake_chance: f64,
}

impl Cli {
    fn autoplay_config(&self, fallback_seed: i32) -> AutoplayConfig {
        AutoplayConfig {
            game_seed: self.game_seed.unwrap_or(fallback_seed),
            bot_seed: self.bot_seed,
            profile: BotProfile {
                reaction_min_ms: self.reaction_min_ms,
                reaction_max_ms: self.reaction_max_ms,
                mistake_chance: self.mistake_chance,
            },
            frame_ms: self.frame_ms,
            max_ms: self.max_ms,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::{SystemTime, UNIX_EPOCH};

    use nopeustesti::{Settings, run_autoplay};

    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    // Same truncation a host applies when seeding from wall-clock millis
    let clock_seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as i32;
    let config = cli.autoplay_config(clock_seed);

    log::info!("Nopeustesti autoplay starting with seed {}", config.game_seed);

    let report = run_autoplay(&settings, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `GameSession` directly
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_autoplay_defaults() {
        let cli = Cli::try_parse_from(["nopeustesti"]).unwrap();
        assert_eq!(cli.game_seed, None);
        assert!(cli.settings.is_none());

        let config = cli.autoplay_config(1);
        assert_eq!(config, AutoplayConfig::default());
    }

    #[test]
    fn test_flags_fill_config() {
        let cli = Cli::try_parse_from([
            "nopeustesti",
            "--game-seed",
            "-42",
            "--bot-seed",
            "9",
            "--settings",
            "fast.json",
            "--frame-ms",
            "8",
            "--mistake-chance",
            "0.25",
        ])
        .unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("fast.json")));

        let config = cli.autoplay_config(1);
        assert_eq!(config.game_seed, -42);
        assert_eq!(config.bot_seed, 9);
        assert_eq!(config.frame_ms, 8);
        assert_eq!(config.profile.mistake_chance, 0.25);
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["nopeustesti", "--game-seed", "abc"]).is_err());
        assert!(Cli::try_parse_from(["nopeustesti", "--bot-seed", "-1"]).is_err());
    }
}
