//! Physics for the polyloop chain: rhythm-driven force field, Verlet
//! integration, and position-based constraint relaxation.
//!
//! Gravity is permanently zero here — the chain drifts under rhythm forces
//! only; this is not a general rope simulator.

pub mod expansion;
pub mod force;
pub mod integrator;
pub mod params;
pub mod solver;

pub use expansion::expansion_step;
pub use force::{ForceField, ForceVector};
pub use integrator::integrate;
pub use params::PhysicsParams;
pub use solver::relax;
