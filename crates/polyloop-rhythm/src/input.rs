//! Rhythm input — the read-only description of one grid cycle.

use crate::LayerSet;
use serde::{Deserialize, Serialize};

/// Spacing and layer data for one polyrhythmic grid cycle.
///
/// `spacings[i]` is the gap between event i and event i+1 in grid units;
/// `layer_map[i]` is the set of layers whose pulses coincide at that gap.
/// `grid_size` is the full grid length (LCM of the active pulse counts).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RhythmInput {
    /// Ordered event gaps, one per segment of the chain.
    pub spacings: Vec<f64>,
    /// Contributing layers per spacing index, parallel to `spacings`.
    pub layer_map: Vec<LayerSet>,
    /// Grid length in pulses; 0 disables the force field.
    pub grid_size: u32,
    /// Pulse count per layer; 0 marks an inactive layer.
    pub pulse_counts: [u32; 4],
}

impl RhythmInput {
    /// Largest spacing value, or 0.0 when empty.
    pub fn max_spacing(&self) -> f64 {
        self.spacings.iter().cloned().fold(0.0, f64::max)
    }

    /// True when the input cannot produce a drawable chain: no spacings,
    /// or no strictly positive spacing to derive a scale factor from.
    pub fn is_degenerate(&self) -> bool {
        self.spacings.is_empty() || self.max_spacing() <= 0.0
    }

    /// Layers at a spacing index; empty set when out of range.
    pub fn layers_at(&self, i: usize) -> LayerSet {
        self.layer_map.get(i).copied().unwrap_or(LayerSet::EMPTY)
    }
}

/// Accumulated rhythmic position of each event, in grid units.
///
/// Returns one entry per node: `positions[0] = 0`, `positions[i]` = sum of the
/// first i spacings.
pub fn event_positions(spacings: &[f64]) -> Vec<f64> {
    let mut positions = Vec::with_capacity(spacings.len() + 1);
    let mut acc = 0.0;
    positions.push(acc);
    for &s in spacings {
        acc += s;
        positions.push(acc);
    }
    positions
}

/// Source of rhythm data, injected into the simulation at build time.
///
/// The actual generator (pulse counts -> spacings and layer map) is an
/// external collaborator; tests and hosts supply a `StaticRhythm`.
pub trait RhythmDataProvider {
    /// Current rhythm data. Called once per rebuild.
    fn rhythm(&self) -> RhythmInput;
}

/// Provider that hands out a fixed, pre-computed `RhythmInput`.
#[derive(Debug, Clone, Default)]
pub struct StaticRhythm {
    input: RhythmInput,
}

impl StaticRhythm {
    pub fn new(input: RhythmInput) -> Self {
        Self { input }
    }
}

impl RhythmDataProvider for StaticRhythm {
    fn rhythm(&self) -> RhythmInput {
        self.input.clone()
    }
}
