//! Progression strategies: which node indices receive force and highlight.

use polyloop_math::triangle_wave;

/// Highlight selector handed to the renderer each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Nothing active (empty chain or disabled field).
    None,
    /// One active index.
    Single(usize),
    /// Symmetric pair; both entries equal at the center of an odd-length
    /// sequence.
    Pair(usize, usize),
}

impl Highlight {
    /// Active indices as a small fixed list.
    pub fn indices(self) -> Vec<usize> {
        match self {
            Highlight::None => vec![],
            Highlight::Single(i) => vec![i],
            Highlight::Pair(i, j) if i == j => vec![i],
            Highlight::Pair(i, j) => vec![i, j],
        }
    }
}

/// Strategy deciding the active-force set from the clock position.
///
/// The same selection doubles as the highlight for the renderer. Strategies
/// are swapped atomically by `ModeController` on mode change.
pub trait ProgressionStrategy {
    /// Active indices for fractional position in [0, n).
    fn active(&self, position: f64, n: usize) -> Highlight;

    /// Whether the rhythm clock is held while the expansion overlay is
    /// engaged.
    fn freeze_during_expansion(&self) -> bool {
        false
    }
}

/// Single marching index: `floor(position)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProgression;

impl ProgressionStrategy for DefaultProgression {
    fn active(&self, position: f64, n: usize) -> Highlight {
        if n == 0 {
            return Highlight::None;
        }
        Highlight::Single((position.floor() as usize).min(n - 1))
    }
}

/// Symmetric pair bouncing from the ends toward the center and back.
///
/// A triangle wave of cycle progress drives one index from 0 up to the
/// center; its mirror is `n - 1 - i`, so the pair always sums to `n - 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorProgression;

impl ProgressionStrategy for MirrorProgression {
    fn active(&self, position: f64, n: usize) -> Highlight {
        if n == 0 {
            return Highlight::None;
        }
        let center = (n - 1) as f64 / 2.0;
        let progress = position / n as f64;
        let i1 = (triangle_wave(progress) * center).round() as usize;
        let i2 = n - 1 - i1;
        Highlight::Pair(i1, i2)
    }
}

/// Anchors-mode progression: the default march, but the clock is held while
/// the expansion overlay is engaged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorsProgression;

impl ProgressionStrategy for AnchorsProgression {
    fn active(&self, position: f64, n: usize) -> Highlight {
        DefaultProgression.active(position, n)
    }

    fn freeze_during_expansion(&self) -> bool {
        true
    }
}
