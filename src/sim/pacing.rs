//! Reveal pacing: an eased speed-up curve and its inverse
//!
//! The table holds the cumulative time (ms since round start) at which each
//! step is due. Looking up elapsed time in it answers "how many lights should
//! be lit by now". Past the end of the table lights keep coming at the
//! fastest interval.

use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::consts::{SEQUENCE_LENGTH, STEP_FASTEST_MS, STEP_SLOWEST_MS};

/// Pacing curve parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Number of steps in the precomputed table
    pub length: usize,
    /// Interval (ms) the curve eases away from
    pub slowest_ms: f64,
    /// Interval (ms) at the peak of the curve, also used past the end of the table
    pub fastest_ms: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            length: SEQUENCE_LENGTH,
            slowest_ms: STEP_SLOWEST_MS,
            fastest_ms: STEP_FASTEST_MS,
        }
    }
}

impl PacingConfig {
    /// Interval (ms) between step `index - 1` and step `index`
    pub fn step_interval(&self, index: usize) -> f64 {
        let t = ((index as f64 / self.length as f64 * PI).sin() + 1.0) / 2.0;
        if t <= 0.0 {
            self.slowest_ms
        } else if t >= 1.0 {
            self.fastest_ms
        } else {
            self.slowest_ms - t * (self.slowest_ms - self.fastest_ms)
        }
    }
}

/// Immutable cumulative reveal times for one `PacingConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct PacingTable {
    config: PacingConfig,
    times: Vec<f64>,
}

impl PacingTable {
    pub fn new(config: PacingConfig) -> Self {
        let mut acc = 0.0;
        let times = (0..config.length)
            .map(|index| {
                acc += config.step_interval(index);
                acc
            })
            .collect();
        Self { config, times }
    }

    /// Process-wide table for the default configuration, built on first use
    pub fn shared() -> Arc<PacingTable> {
        static SHARED: OnceLock<Arc<PacingTable>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(PacingTable::new(PacingConfig::default())))
            .clone()
    }

    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Cumulative time of the final table entry
    pub fn last_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Number of steps that should have been revealed `elapsed_ms` after round start
    pub fn index_for_elapsed(&self, elapsed_ms: f64) -> usize {
        let last = self.last_time();
        if elapsed_ms >= last {
            let fastest = self.config.fastest_ms;
            // Float-to-int casts saturate, so huge or infinite elapsed times clamp
            let mut steps = ((elapsed_ms - last) / fastest).floor() as usize;
            // Division can round just below a whole step
            if steps < usize::MAX && last + (steps + 1) as f64 * fastest <= elapsed_ms {
                steps += 1;
            }
            return self.times.len().saturating_add(steps);
        }
        // First entry strictly greater than elapsed
        self.times.partition_point(|&time| time <= elapsed_ms)
    }
}
