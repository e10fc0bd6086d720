//! Chain model for the polyloop simulation.
//!
//! A `Chain` is the node/segment graph built from one rhythm spacing
//! sequence: one node per event plus segments whose rest lengths encode the
//! gaps between events. Nodes are mutated every tick by the integrator and
//! constraint solver; the chain topology only changes on rebuild and on loop
//! closure.

pub mod chain;
pub mod node;
pub mod segment;

pub use chain::{Chain, ChainBuilder};
pub use node::Node;
pub use segment::Segment;

/// Visual length of the largest spacing, in screen units.
///
/// Every build derives a single uniform scale factor from this:
/// `scale_factor = MAX_VISUAL_LENGTH / max(spacings)`.
pub const MAX_VISUAL_LENGTH: f64 = 150.0;
