//! Centroid-outward expansion physics.
//!
//! Active only while the expansion overlay is held: normal force application
//! is suspended and every unpinned node is pushed away from the chain's
//! centroid through the regular Verlet step, then extra relaxation passes
//! keep segment lengths approximately intact.

use crate::params::{EXPANSION_EXTRA_PASSES, EXPANSION_PUSH, FORCE_STEP, PhysicsParams};
use crate::{integrate, relax};
use polyloop_model::Chain;

/// One tick of expansion-overlay physics.
pub fn expansion_step(chain: &mut Chain, params: PhysicsParams) {
    let Some(centroid) = chain.centroid() else {
        return;
    };

    // Outward impulses, expressed as per-node forces for the Verlet step.
    let mut pushes = Vec::with_capacity(chain.nodes.len());
    for (i, node) in chain.nodes.iter().enumerate() {
        if node.pinned {
            continue;
        }
        let radial = node.position - centroid;
        let length = radial.norm();
        if length == 0.0 {
            continue; // node sitting on the centroid has no outward direction
        }
        // Pre-divide by FORCE_STEP so the net displacement through the
        // Verlet step is exactly EXPANSION_PUSH.
        pushes.push((i, radial / length * (EXPANSION_PUSH / FORCE_STEP)));
    }

    integrate(chain, params, &pushes);
    relax(chain, params);

    let extra = PhysicsParams {
        iterations: EXPANSION_EXTRA_PASSES,
        ..params
    };
    relax(chain, extra);
}
