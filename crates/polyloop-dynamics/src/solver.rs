//! Position-based constraint relaxation.

use crate::params::PhysicsParams;
use polyloop_model::Chain;

/// Run `params.iterations` relaxation passes over all segments.
///
/// Each pass moves segment endpoints toward rest length by half the scaled
/// deviation on each side; pinned endpoints absorb no correction, pushing the
/// full correction onto the free end. Convergence is approximate — the fixed
/// pass count is part of the visual behavior. Zero-length segments are
/// skipped for the tick to avoid dividing by zero.
pub fn relax(chain: &mut Chain, params: PhysicsParams) {
    for _ in 0..params.iterations {
        relax_once(chain, params.tension);
    }
}

fn relax_once(chain: &mut Chain, tension: f64) {
    for si in 0..chain.segments.len() {
        let seg = chain.segments[si];
        let delta = chain.nodes[seg.b].position - chain.nodes[seg.a].position;
        let length = delta.norm();
        if length == 0.0 {
            continue;
        }
        let percent = (seg.rest_length - length) / length / 2.0 * tension;
        let offset = delta * percent;
        if !chain.nodes[seg.a].pinned {
            chain.nodes[seg.a].position -= offset;
        }
        if !chain.nodes[seg.b].pinned {
            chain.nodes[seg.b].position += offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polyloop_math::Vec2;
    use polyloop_model::{ChainBuilder, Node, Segment};

    #[test]
    fn test_relax_restores_stretched_segment() {
        let mut chain = ChainBuilder::new().build(&[4.0, 4.0]);
        // Stretch the middle node sideways.
        chain.nodes[1].position += Vec2::new(0.0, 80.0);

        relax(&mut chain, PhysicsParams::SETTLE);

        for seg in &chain.segments {
            let len = seg.current_length(&chain.nodes);
            let err = (len - seg.rest_length).abs() / seg.rest_length;
            assert!(err < 0.02, "segment error {err} above 2%");
        }
    }

    #[test]
    fn test_pinned_endpoint_takes_no_correction() {
        let mut chain = ChainBuilder::new().build(&[4.0]);
        let anchor = chain.nodes[0].position;
        chain.nodes[1].position += Vec2::new(50.0, 0.0);

        relax(&mut chain, PhysicsParams::SETTLE);
        assert_relative_eq!(chain.nodes[0].position, anchor);
    }

    #[test]
    fn test_zero_length_segment_skipped() {
        let p = Vec2::new(10.0, 10.0);
        let mut chain = Chain {
            nodes: vec![Node::at(p), Node::at(p)],
            segments: vec![Segment {
                a: 0,
                b: 1,
                rest_length: 5.0,
                spacing: 1.0,
            }],
            scale_factor: 1.0,
            closed: false,
        };
        // Must not panic or produce NaN.
        relax(&mut chain, PhysicsParams::SETTLE);
        assert!(chain.nodes[0].position.x.is_finite());
        assert_relative_eq!(chain.nodes[0].position, p);
    }
}
