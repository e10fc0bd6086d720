//! polyloop — real-time node-link physics rendering of polyrhythmic cycles.
//!
//! A closed rhythmic structure is drawn as a chain of rigid segments whose
//! lengths encode the gaps between events in one grid cycle. Each render
//! tick the phase machine, progression strategy, Verlet integrator,
//! constraint solver and auto-framing camera advance together; the renderer
//! is handed a `RenderFrame` at the end.
//!
//! This is the umbrella crate: it provides the `Simulation` driver and
//! re-exports core types from the sub-crates.

pub mod config;
pub mod frame;
pub mod sim;
pub mod ticker;

pub use config::{ConfigError, SimConfig};
pub use frame::RenderFrame;
pub use sim::Simulation;
pub use ticker::{FixedTimestep, Ticker};

pub use polyloop_camera::{self, CameraController, CameraState};
pub use polyloop_dynamics::{self, ForceField, PhysicsParams};
pub use polyloop_math::{self, Vec2};
pub use polyloop_model::{self, Chain, ChainBuilder, Node, Segment};
pub use polyloop_phase::{self, Highlight, Mode, Phase, RhythmClock};
pub use polyloop_rhythm::{
    self, LayerId, LayerSet, RhythmDataProvider, RhythmInput, StaticRhythm,
};
