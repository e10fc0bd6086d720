//! Advanced-mode controller: strategy swap plus anchors lock state.

use crate::progression::{
    AnchorsProgression, DefaultProgression, Highlight, MirrorProgression, ProgressionStrategy,
};
use polyloop_rhythm::{LayerId, RatioCandidate, RhythmInput, event_positions, ratio_candidates};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tolerance when matching accumulated positions against a lock period.
const PERIOD_EPSILON: f64 = 1e-6;

/// Advanced mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Off,
    Mirror,
    Anchors,
}

/// Lock state for anchors mode.
///
/// `pinned` is derived: recomputed from the lock sets whenever they change,
/// never mutated directly.
#[derive(Debug, Clone, Default)]
pub struct AnchorState {
    /// Per-layer locks; a locked layer pins every node whose layer-map entry
    /// contains it.
    pub layer_locks: [bool; 4],
    /// Engaged nested-ratio locks, keyed by layer pair.
    pub ratio_locks: HashSet<(LayerId, LayerId)>,
    /// Lockable layer pairs for the current rhythm input.
    pub candidates: Vec<RatioCandidate>,
    /// Node indices pinned by the locks above.
    pub pinned: HashSet<usize>,
}

impl AnchorState {
    /// Fresh state for a rhythm input: all locks off, candidates computed.
    fn reset_for(&mut self, input: &RhythmInput) {
        self.layer_locks = [false; 4];
        self.ratio_locks.clear();
        self.pinned.clear();
        self.candidates = ratio_candidates(&input.pulse_counts, input.grid_size);
    }

    /// Drop everything; used when leaving anchors mode.
    fn clear(&mut self) {
        self.layer_locks = [false; 4];
        self.ratio_locks.clear();
        self.candidates.clear();
        self.pinned.clear();
    }

    /// Rebuild the pinned set from the current locks.
    ///
    /// Layer locks pin node i when `layer_map[i]` contains the layer; ratio
    /// locks pin every node whose accumulated position is a multiple of the
    /// lock's period. The two sources are independent: releasing one leaves
    /// the other's pins in place.
    fn recompute_pins(&mut self, input: &RhythmInput) {
        self.pinned.clear();

        for (li, &locked) in self.layer_locks.iter().enumerate() {
            if !locked {
                continue;
            }
            let layer = LayerId::ALL[li];
            for i in 0..input.spacings.len() {
                if input.layers_at(i).contains(layer) {
                    self.pinned.insert(i);
                }
            }
        }

        if !self.ratio_locks.is_empty() {
            let positions = event_positions(&input.spacings);
            for candidate in &self.candidates {
                if !self.ratio_locks.contains(&candidate.key()) {
                    continue;
                }
                for (i, &pos) in positions.iter().enumerate() {
                    let cycles = pos / candidate.period;
                    if (cycles - cycles.round()).abs() < PERIOD_EPSILON {
                        self.pinned.insert(i);
                    }
                }
            }
        }
    }
}

/// Holds the active progression strategy and anchors state; swapped as a
/// unit on `set_mode`.
pub struct ModeController {
    mode: Mode,
    strategy: Box<dyn ProgressionStrategy>,
    anchors: AnchorState,
}

impl ModeController {
    /// Start in `Mode::Off`.
    pub fn new() -> Self {
        Self {
            mode: Mode::Off,
            strategy: Box::new(DefaultProgression),
            anchors: AnchorState::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Anchors lock state; empty outside anchors mode.
    pub fn anchors(&self) -> &AnchorState {
        &self.anchors
    }

    /// Switch mode, applying entry/exit side effects.
    ///
    /// Leaving anchors clears all lock and pin state; entering anchors
    /// resets locks and recomputes ratio candidates for the given input.
    pub fn set_mode(&mut self, mode: Mode, input: &RhythmInput) {
        if mode == self.mode {
            return;
        }
        if self.mode == Mode::Anchors {
            self.anchors.clear();
        }
        self.strategy = match mode {
            Mode::Off => Box::new(DefaultProgression),
            Mode::Mirror => Box::new(MirrorProgression),
            Mode::Anchors => {
                self.anchors.reset_for(input);
                Box::new(AnchorsProgression)
            }
        };
        self.mode = mode;
    }

    /// Active force/highlight indices for this tick.
    pub fn active(&self, position: f64, n: usize) -> Highlight {
        self.strategy.active(position, n)
    }

    /// Whether the rhythm clock holds while the expansion overlay is held.
    pub fn freeze_during_expansion(&self) -> bool {
        self.strategy.freeze_during_expansion()
    }

    /// Toggle a layer lock and recompute pins.
    ///
    /// Ignored (returns false) outside anchors mode.
    pub fn toggle_layer_lock(&mut self, layer: LayerId, input: &RhythmInput) -> bool {
        if self.mode != Mode::Anchors {
            return false;
        }
        self.anchors.layer_locks[layer.index()] = !self.anchors.layer_locks[layer.index()];
        self.anchors.recompute_pins(input);
        true
    }

    /// Toggle a nested-ratio lock and recompute pins.
    ///
    /// Keys not in the candidate list are rejected, leaving state unchanged.
    pub fn toggle_ratio_lock(&mut self, key: (LayerId, LayerId), input: &RhythmInput) -> bool {
        if self.mode != Mode::Anchors {
            return false;
        }
        if !self.anchors.candidates.iter().any(|c| c.key() == key) {
            return false;
        }
        if !self.anchors.ratio_locks.remove(&key) {
            self.anchors.ratio_locks.insert(key);
        }
        self.anchors.recompute_pins(input);
        true
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}
