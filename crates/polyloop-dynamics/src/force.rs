//! Rhythm-synchronized directional force field.
//!
//! Each spacing index gets one precomputed force vector: the sum over its
//! contributing layers of that layer's direction unit vector, scaled by the
//! spacing, the build's scale factor, and the amplitude setting. Vectors are
//! recomputed whenever amplitude, directions, or rhythm input change.

use polyloop_math::{Vec2, unit_from_angle};
use polyloop_rhythm::{LayerId, RhythmInput};

/// Base force constant before spacing/scale/amplitude multipliers.
pub const BASE_FORCE: f64 = 0.02;

/// Amplitude clamp range.
pub const MIN_AMPLITUDE: f64 = 0.1;
pub const MAX_AMPLITUDE: f64 = 100.0;

/// Default amplitude: geometric midpoint of the clamp range.
pub const DEFAULT_AMPLITUDE: f64 = 3.1622776601683795;

/// Default layer directions: one cardinal direction per layer.
pub const DEFAULT_DIRECTIONS: [f64; 4] = [
    0.0,
    std::f64::consts::FRAC_PI_2,
    std::f64::consts::PI,
    3.0 * std::f64::consts::FRAC_PI_2,
];

/// A precomputed per-index force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceVector {
    /// Summed direction-weighted force.
    pub vector: Vec2,
    pub magnitude: f64,
}

impl ForceVector {
    /// Zero force.
    pub fn zero() -> ForceVector {
        ForceVector {
            vector: Vec2::zeros(),
            magnitude: 0.0,
        }
    }
}

/// Per-node directional force field derived from the rhythm layer map.
#[derive(Debug, Clone)]
pub struct ForceField {
    /// Direction angle per layer, radians.
    pub directions: [f64; 4],
    /// Amplitude multiplier, clamped to [MIN_AMPLITUDE, MAX_AMPLITUDE].
    amplitude: f64,
    forces: Vec<ForceVector>,
}

impl ForceField {
    /// Field with default directions and amplitude, no forces yet.
    pub fn new() -> Self {
        Self {
            directions: DEFAULT_DIRECTIONS,
            amplitude: DEFAULT_AMPLITUDE,
            forces: Vec::new(),
        }
    }

    /// Current amplitude multiplier.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Set the amplitude multiplier, clamped to the valid range.
    ///
    /// The force table must be recomputed afterwards.
    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude.clamp(MIN_AMPLITUDE, MAX_AMPLITUDE);
    }

    /// Override one layer's direction angle.
    pub fn set_direction(&mut self, layer: LayerId, angle: f64) {
        self.directions[layer.index()] = angle;
    }

    /// Rebuild the per-index force table for the given rhythm input and
    /// build scale factor.
    ///
    /// A zero grid size disables the field: every entry is zero.
    pub fn recompute(&mut self, input: &RhythmInput, scale_factor: f64) {
        self.forces.clear();
        if input.grid_size == 0 {
            self.forces
                .resize(input.spacings.len(), ForceVector::zero());
            return;
        }
        for (i, &spacing) in input.spacings.iter().enumerate() {
            let mut vector = Vec2::zeros();
            for layer in input.layers_at(i).iter() {
                let unit = unit_from_angle(self.directions[layer.index()]);
                vector += unit * (spacing * BASE_FORCE * scale_factor * self.amplitude);
            }
            self.forces.push(ForceVector {
                vector,
                magnitude: vector.norm(),
            });
        }
    }

    /// Force at a spacing index; zero when out of range.
    pub fn force_at(&self, i: usize) -> ForceVector {
        self.forces.get(i).copied().unwrap_or_else(ForceVector::zero)
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }
}

impl Default for ForceField {
    fn default() -> Self {
        Self::new()
    }
}
