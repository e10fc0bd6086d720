//! Externally mutable configuration snapshot.
//!
//! Input-event callbacks write through the `Simulation` setters, which
//! validate into this struct; the tick loop reads it once at the start of
//! each tick. Execution is single-threaded and cooperative, so no locking
//! is involved — if the simulation is ever moved behind a multi-threaded
//! host, this struct is the thing to put behind a swap.

use polyloop_dynamics::force::{DEFAULT_AMPLITUDE, DEFAULT_DIRECTIONS};
use polyloop_phase::Mode;
use polyloop_phase::clock::DEFAULT_CYCLE_S;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected external parameter; the previous valid value is retained.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },

    #[error("{name} must be greater than {min}")]
    TooSmall { name: &'static str, min: f64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Single-writer configuration snapshot, read once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Rhythm cycle duration, seconds; always finite and > 0.
    pub cycle_duration_s: f64,
    /// Force amplitude multiplier; kept inside the clamp range.
    pub force_amplitude: f64,
    /// Direction angle per layer, radians.
    pub layer_directions: [f64; 4],
    /// Active advanced mode.
    pub mode: Mode,
    /// Include per-node force vectors in the render frame.
    pub debug_forces: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cycle_duration_s: DEFAULT_CYCLE_S,
            force_amplitude: DEFAULT_AMPLITUDE,
            layer_directions: DEFAULT_DIRECTIONS,
            mode: Mode::Off,
            debug_forces: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.cycle_duration_s > 0.0);
        assert!(config.force_amplitude >= 0.1 && config.force_amplitude <= 100.0);
        assert_eq!(config.mode, Mode::Off);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SimConfig {
            cycle_duration_s: 3.5,
            mode: Mode::Mirror,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cycle_duration_s, 3.5);
        assert_eq!(back.mode, Mode::Mirror);
    }
}
