//! Chain construction and whole-chain queries.

use crate::{MAX_VISUAL_LENGTH, Node, Segment};
use polyloop_math::Vec2;

/// Node/segment graph for one rhythm cycle.
///
/// While open, segment count equals the spacing count; `close_loop` appends
/// one closing segment linking last to first without adding a node.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    /// All nodes; index 0 is the anchor-side node.
    pub nodes: Vec<Node>,
    /// Distance constraints between nodes.
    pub segments: Vec<Segment>,
    /// Uniform world-units-per-grid-unit factor for this build.
    pub scale_factor: f64,
    /// True once the closing segment exists.
    pub closed: bool,
}

impl Chain {
    /// Empty chain; drawn as nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the last node, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    /// Mean of all node positions; None when empty.
    pub fn centroid(&self) -> Option<Vec2> {
        if self.nodes.is_empty() {
            return None;
        }
        let sum: Vec2 = self.nodes.iter().map(|n| n.position).sum();
        Some(sum / self.nodes.len() as f64)
    }

    /// Axis-aligned bounding box of all node positions as (min, max).
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = self.nodes.first()?.position;
        let mut min = first;
        let mut max = first;
        for node in &self.nodes[1..] {
            let p = node.position;
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// Link last node to node 0 with a segment whose rest length is their
    /// current distance, and unpin both ends.
    ///
    /// No-op on an empty, single-node, or already closed chain.
    pub fn close_loop(&mut self) {
        if self.closed || self.nodes.len() < 2 {
            return;
        }
        let last = self.nodes.len() - 1;
        let rest = (self.nodes[last].position - self.nodes[0].position).norm();
        self.segments.push(Segment {
            a: last,
            b: 0,
            rest_length: rest,
            spacing: 0.0,
        });
        self.nodes[0].pinned = false;
        self.nodes[last].pinned = false;
        self.closed = true;
    }
}

/// Builder for chains, one per rhythm rebuild.
pub struct ChainBuilder {
    anchor: Vec2,
    max_visual_length: f64,
}

impl ChainBuilder {
    /// Start building with the default anchor offset and visual length.
    pub fn new() -> Self {
        Self {
            anchor: Vec2::new(160.0, 120.0),
            max_visual_length: MAX_VISUAL_LENGTH,
        }
    }

    /// Screen offset of the pinned first node.
    pub fn anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Visual length assigned to the largest spacing.
    pub fn max_visual_length(mut self, length: f64) -> Self {
        self.max_visual_length = length;
        self
    }

    /// Build a chain from the spacing sequence.
    ///
    /// Node 0 is pinned at the anchor; each following node is laid out along
    /// the +x axis at `spacing * scale_factor` from its predecessor, with a
    /// matching segment. Degenerate input (empty, or max spacing <= 0)
    /// silently yields an empty chain.
    pub fn build(self, spacings: &[f64]) -> Chain {
        let max = spacings.iter().cloned().fold(0.0, f64::max);
        if spacings.is_empty() || max <= 0.0 {
            return Chain::empty();
        }
        let scale_factor = self.max_visual_length / max;

        let mut nodes = Vec::with_capacity(spacings.len() + 1);
        let mut segments = Vec::with_capacity(spacings.len());
        nodes.push(Node::pinned_at(self.anchor));

        let mut cursor = self.anchor;
        for (i, &spacing) in spacings.iter().enumerate() {
            let rest = spacing * scale_factor;
            cursor += Vec2::new(rest, 0.0);
            nodes.push(Node::at(cursor));
            segments.push(Segment {
                a: i,
                b: i + 1,
                rest_length: rest,
                spacing,
            });
        }

        Chain {
            nodes,
            segments,
            scale_factor,
            closed: false,
        }
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
