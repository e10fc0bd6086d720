//! Rigid segment constraint between two nodes.

use crate::Node;

/// A distance constraint between two nodes, targeting `rest_length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// First endpoint, index into the chain's node list.
    pub a: usize,
    /// Second endpoint.
    pub b: usize,
    /// Target distance in world units.
    pub rest_length: f64,
    /// Source rhythm gap this segment encodes, in grid units.
    ///
    /// The closing segment carries 0.0: it links last to first and has no
    /// spacing of its own.
    pub spacing: f64,
}

impl Segment {
    /// Current Euclidean distance between the endpoints.
    pub fn current_length(&self, nodes: &[Node]) -> f64 {
        (nodes[self.b].position - nodes[self.a].position).norm()
    }

    /// Signed deviation from rest length (positive = too short).
    pub fn strain(&self, nodes: &[Node]) -> f64 {
        self.rest_length - self.current_length(nodes)
    }
}
