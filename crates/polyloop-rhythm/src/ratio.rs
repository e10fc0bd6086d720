//! Nested-ratio lock candidates.
//!
//! Two active layers whose pulse counts share a common divisor > 1 trace a
//! nested cycle inside the grid: their coinciding pulses repeat every
//! `grid_size / gcd` pulses. Anchors mode offers one lock per such pair.

use crate::{LayerId, gcd};
use serde::{Deserialize, Serialize};

/// A lockable pair of layers with rhythmically nested pulse counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioCandidate {
    /// The pair of layers, in index order.
    pub layers: (LayerId, LayerId),
    /// Shared divisor of the two pulse counts (> 1).
    pub divisor: u32,
    /// Repeat period of the shared pulses, in grid units.
    pub period: f64,
}

impl RatioCandidate {
    /// Stable key for toggling this lock from the control surface.
    pub fn key(&self) -> (LayerId, LayerId) {
        self.layers
    }
}

/// Compute all nested-ratio candidates for the given pulse counts.
///
/// Inactive layers (pulse count 0) never participate; a zero grid size yields
/// no candidates, matching the force field being disabled in that case.
pub fn ratio_candidates(pulse_counts: &[u32; 4], grid_size: u32) -> Vec<RatioCandidate> {
    let mut candidates = Vec::new();
    if grid_size == 0 {
        return candidates;
    }
    for i in 0..4 {
        for j in (i + 1)..4 {
            let (a, b) = (pulse_counts[i], pulse_counts[j]);
            if a == 0 || b == 0 {
                continue;
            }
            let d = gcd(a, b);
            if d > 1 {
                candidates.push(RatioCandidate {
                    layers: (LayerId::ALL[i], LayerId::ALL[j]),
                    divisor: d,
                    period: grid_size as f64 / d as f64,
                });
            }
        }
    }
    candidates
}
