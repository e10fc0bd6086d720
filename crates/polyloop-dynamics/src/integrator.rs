//! Verlet position update.

use crate::params::{FORCE_STEP, PhysicsParams};
use polyloop_math::Vec2;
use polyloop_model::Chain;

/// Advance every unpinned node by one Verlet step.
///
/// `active_forces` lists (node index, force) pairs for this tick — the
/// progression strategy decides which indices are active. Velocity is the
/// damped position delta; forces enter through the fixed `FORCE_STEP`
/// multiplier. Gravity is always zero.
pub fn integrate(chain: &mut Chain, params: PhysicsParams, active_forces: &[(usize, Vec2)]) {
    for (i, node) in chain.nodes.iter_mut().enumerate() {
        if node.pinned {
            continue;
        }
        let mut velocity = node.velocity() * params.damping;
        for &(idx, force) in active_forces {
            if idx == i {
                velocity += force * FORCE_STEP;
            }
        }
        let prev = node.position;
        node.position += velocity;
        node.previous_position = prev;
    }
}
