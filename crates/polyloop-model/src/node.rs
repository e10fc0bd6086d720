//! Point-mass node updated via Verlet integration.

use polyloop_math::Vec2;

/// A point mass in the chain.
///
/// Velocity is implicit: the integrator reads it as
/// `position - previous_position`. Pinned nodes are excluded from both
/// integration and constraint relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Current position in world units.
    pub position: Vec2,
    /// Position at the previous tick (Verlet velocity store).
    pub previous_position: Vec2,
    /// Excluded from physics when true.
    pub pinned: bool,
}

impl Node {
    /// Create a node at rest at the given position.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            previous_position: position,
            pinned: false,
        }
    }

    /// Create a pinned node at the given position.
    pub fn pinned_at(position: Vec2) -> Self {
        Self {
            pinned: true,
            ..Self::at(position)
        }
    }

    /// Implicit Verlet velocity.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous_position
    }

    /// Move the node to a position, zeroing its implicit velocity.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.previous_position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_node_starts_at_rest() {
        let node = Node::at(Vec2::new(3.0, 4.0));
        assert_relative_eq!(node.velocity(), Vec2::zeros());
        assert!(!node.pinned);
    }

    #[test]
    fn test_teleport_zeroes_velocity() {
        let mut node = Node::at(Vec2::zeros());
        node.position = Vec2::new(5.0, 0.0); // picked up some velocity
        assert!(node.velocity().norm() > 0.0);
        node.teleport(Vec2::new(1.0, 1.0));
        assert_relative_eq!(node.velocity(), Vec2::zeros());
    }
}
