//! Rhythm input data model for the polyloop simulation.
//!
//! `RhythmInput` is the read-only description of one polyrhythmic grid cycle
//! that the chain is built from: the gaps between consecutive events, which
//! layers coincide at each gap, and the grid length. The generator that
//! produces this data from pulse counts lives outside this workspace; the
//! simulation only consumes it through `RhythmDataProvider`.

pub mod input;
pub mod layer;
pub mod ratio;

pub use input::{RhythmDataProvider, RhythmInput, StaticRhythm, event_positions};
pub use layer::{LayerId, LayerSet};
pub use ratio::{RatioCandidate, ratio_candidates};

/// Number of rhythm layers.
pub const NUM_LAYERS: usize = 4;

/// Greatest common divisor.
pub fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Least common multiple; 0 if either argument is 0.
pub fn lcm(a: u32, b: u32) -> u32 {
    if a == 0 || b == 0 { 0 } else { a / gcd(a, b) * b }
}
