//! Animation lifecycle and rhythm progression for the polyloop simulation.
//!
//! `PhaseController` drives hanging -> connecting -> settling on accumulated
//! tick time; `RhythmClock` tracks position within the rhythm cycle; the
//! progression strategies decide which node indices receive force and
//! highlighting each tick, swapped as a unit by `ModeController`.

pub mod clock;
pub mod mode;
pub mod phase;
pub mod progression;

pub use clock::RhythmClock;
pub use mode::{AnchorState, Mode, ModeController};
pub use phase::{CONNECTING_MS, HANGING_MS, Phase, PhaseController, PhaseEvent};
pub use progression::{
    AnchorsProgression, DefaultProgression, Highlight, MirrorProgression, ProgressionStrategy,
};
