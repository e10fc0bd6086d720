//! Integration tests for the polyloop simulation.

use approx::assert_relative_eq;
use polyloop::{
    ChainBuilder, FixedTimestep, Highlight, LayerId, LayerSet, Mode, Phase, PhysicsParams,
    RhythmInput, Simulation, StaticRhythm, Ticker, Vec2,
    polyloop_dynamics::relax,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Four even gaps in a 16-pulse grid, all carried by layer A.
fn four_even() -> StaticRhythm {
    StaticRhythm::new(RhythmInput {
        spacings: vec![4.0, 4.0, 4.0, 4.0],
        layer_map: vec![LayerSet::from_layers(&[LayerId::A]); 4],
        grid_size: 16,
        pulse_counts: [4, 0, 0, 0],
    })
}

/// Five uneven gaps summing to a 12-pulse grid, two active layers.
fn five_uneven() -> StaticRhythm {
    StaticRhythm::new(RhythmInput {
        spacings: vec![1.0, 2.0, 3.0, 4.0, 2.0],
        layer_map: vec![
            LayerSet::from_layers(&[LayerId::A]),
            LayerSet::from_layers(&[LayerId::B]),
            LayerSet::from_layers(&[LayerId::A, LayerId::B]),
            LayerSet::from_layers(&[LayerId::A]),
            LayerSet::from_layers(&[LayerId::B]),
        ],
        grid_size: 12,
        pulse_counts: [4, 3, 0, 0],
    })
}

const DT_MS: f64 = 125.0;

fn started(provider: &StaticRhythm) -> Simulation {
    let mut sim = Simulation::new(provider, 800.0, 600.0);
    sim.start_animation();
    sim
}

/// Tick through hanging (2000 ms) and connecting (3000 ms).
fn run_to_settling(sim: &mut Simulation) {
    let frames = (5000.0 / DT_MS) as usize;
    for _ in 0..frames {
        sim.tick(DT_MS);
    }
    assert_eq!(sim.phase(), Phase::Settling);
}

#[test]
fn segments_converge_within_two_percent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let n = rng.gen_range(3..12);
        let spacings: Vec<f64> = (0..n).map(|_| rng.gen_range(2.0..8.0)).collect();
        let mut chain = ChainBuilder::new().build(&spacings);

        // Perturb every free node, then run one settling-phase pass count.
        for node in chain.nodes.iter_mut().filter(|n| !n.pinned) {
            let jitter = Vec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
            node.position += jitter;
        }
        relax(&mut chain, PhysicsParams::SETTLE);

        for seg in &chain.segments {
            let len = seg.current_length(&chain.nodes);
            let err = (len - seg.rest_length).abs() / seg.rest_length;
            assert!(err < 0.02, "segment error {err} above 2%");
        }
    }
}

#[test]
fn phase_timing_is_deterministic() {
    // Identical timing for very different spacing sets.
    for provider in [four_even(), five_uneven()] {
        let mut sim = started(&provider);

        // 1875 ms: still hanging.
        for _ in 0..15 {
            sim.tick(DT_MS);
        }
        assert_eq!(sim.phase(), Phase::Hanging);

        // 2000 ms: connecting starts.
        sim.tick(DT_MS);
        assert_eq!(sim.phase(), Phase::Connecting);

        // 4875 ms: still connecting.
        for _ in 0..23 {
            sim.tick(DT_MS);
        }
        assert_eq!(sim.phase(), Phase::Connecting);

        // 5000 ms: settling.
        sim.tick(DT_MS);
        assert_eq!(sim.phase(), Phase::Settling);
    }
}

#[test]
fn build_counts_and_loop_closure() {
    let provider = four_even();
    let mut sim = started(&provider);
    assert_eq!(sim.chain().node_count(), 5);
    assert_eq!(sim.chain().segments.len(), 4);

    run_to_settling(&mut sim);

    // Closing segment appended, no new node.
    assert_eq!(sim.chain().node_count(), 5);
    assert_eq!(sim.chain().segments.len(), 5);
    assert!(sim.chain().closed);

    // The four original segments are equal length.
    let rest = sim.chain().segments[0].rest_length;
    for seg in &sim.chain().segments[..4] {
        assert_relative_eq!(seg.rest_length, rest);
    }
}

#[test]
fn default_progression_visits_indices_in_order() {
    let provider = four_even();
    let mut sim = started(&provider);
    run_to_settling(&mut sim);

    // Default cycle is 2 s; with 4 spacings the index advances every 500 ms.
    let mut visited = Vec::new();
    for _ in 0..17 {
        let Highlight::Single(i) = sim.highlight() else {
            panic!("default mode must yield exactly one active index");
        };
        if visited.last() != Some(&i) {
            visited.push(i);
        }
        sim.tick(DT_MS);
    }
    // One full cycle: 0,1,2,3 in order, then wrap.
    assert_eq!(visited, vec![0, 1, 2, 3, 0]);
}

#[test]
fn default_progression_is_monotonic_within_cycle() {
    let provider = five_uneven();
    let mut sim = started(&provider);
    run_to_settling(&mut sim);

    let mut last = 0usize;
    // Stay strictly inside one cycle (2 s) to observe monotonicity.
    for _ in 0..15 {
        sim.tick(DT_MS);
        let Highlight::Single(i) = sim.highlight() else {
            panic!("default mode must yield exactly one active index");
        };
        assert!(i >= last, "active index went backwards inside a cycle");
        last = i;
    }
}

#[test]
fn mirror_pairs_sum_to_n_minus_1() {
    let provider = five_uneven();
    let mut sim = started(&provider);
    run_to_settling(&mut sim);
    sim.set_mode(Mode::Mirror);

    for _ in 0..50 {
        sim.tick(DT_MS);
        let Highlight::Pair(i1, i2) = sim.highlight() else {
            panic!("mirror mode must yield a pair");
        };
        assert_eq!(i1 + i2, 4);
    }
}

#[test]
fn camera_scale_never_exceeds_cap() {
    let provider = four_even();
    let mut sim = started(&provider);
    let ticker = FixedTimestep::sixty_hz();
    ticker.run(&mut sim, 900);
    assert!(sim.camera().state().scale <= 2.0 + 1e-9);
    assert!(sim.camera().state().target_scale <= 2.0 + 1e-9);
}

#[test]
fn minimum_amplitude_still_produces_force() {
    let provider = four_even();
    let mut sim = started(&provider);
    sim.set_debug_forces(true);
    sim.set_force_amplitude(0.1).unwrap();
    run_to_settling(&mut sim);
    sim.tick(DT_MS);

    let frame = sim.frame();
    let forces = frame.forces.expect("debug forces enabled");
    assert!(!forces.is_empty());
    for (_, force) in forces {
        let magnitude = force.norm();
        assert!(magnitude > 0.0, "minimum amplitude must still push");
        assert!(magnitude.is_finite());
    }
}

#[test]
fn invalid_parameters_are_rejected_and_retained() {
    let provider = four_even();
    let mut sim = started(&provider);

    sim.set_cycle_duration(3.0).unwrap();
    assert!(sim.set_cycle_duration(f64::NAN).is_err());
    assert!(sim.set_cycle_duration(0.0).is_err());
    assert!(sim.set_cycle_duration(-2.0).is_err());
    assert_relative_eq!(sim.config().cycle_duration_s, 3.0);

    assert!(sim.set_force_amplitude(f64::INFINITY).is_err());
    // Finite but out-of-range input clamps rather than erroring.
    sim.set_force_amplitude(1e6).unwrap();
    assert_relative_eq!(sim.config().force_amplitude, 100.0);

    assert!(sim.set_layer_direction(LayerId::B, f64::NAN).is_err());
}

#[test]
fn anchors_layer_lock_pins_and_unpins_exactly() {
    let provider = five_uneven();
    let mut sim = started(&provider);
    run_to_settling(&mut sim);
    sim.set_mode(Mode::Anchors);

    // Layer A appears at spacing indices 0, 2, 3.
    assert!(sim.toggle_layer_lock(LayerId::A));
    let pinned: Vec<usize> = sim
        .chain()
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.pinned)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(pinned, vec![0, 2, 3]);

    // Toggling off releases exactly those nodes.
    assert!(sim.toggle_layer_lock(LayerId::A));
    assert!(sim.chain().nodes.iter().all(|n| !n.pinned));
}

#[test]
fn anchors_layer_unlock_preserves_ratio_pins() {
    // 4-against-6 pulse counts share divisor 2: ratio lock available.
    let provider = StaticRhythm::new(RhythmInput {
        spacings: vec![3.0, 3.0, 3.0, 3.0],
        layer_map: vec![LayerSet::from_layers(&[LayerId::A, LayerId::B]); 4],
        grid_size: 12,
        pulse_counts: [4, 6, 0, 0],
    });
    let mut sim = started(&provider);
    run_to_settling(&mut sim);
    sim.set_mode(Mode::Anchors);

    assert!(sim.toggle_ratio_lock((LayerId::A, LayerId::B)));
    let ratio_pinned: Vec<bool> = sim.chain().nodes.iter().map(|n| n.pinned).collect();
    // Period 12/2 = 6; positions 0,3,6,9,12 -> nodes 0, 2, 4.
    assert_eq!(ratio_pinned, vec![true, false, true, false, true]);

    // A layer lock on and off again leaves the ratio pins alone.
    assert!(sim.toggle_layer_lock(LayerId::B));
    assert!(sim.toggle_layer_lock(LayerId::B));
    let after: Vec<bool> = sim.chain().nodes.iter().map(|n| n.pinned).collect();
    assert_eq!(after, ratio_pinned);
}

#[test]
fn expansion_hold_suspends_progression_and_resyncs() {
    let provider = four_even();
    let mut sim = started(&provider);
    run_to_settling(&mut sim);

    // Not available before release back to settling-only states is tested
    // in the phase crate; here: the overlay suspends highlighting.
    assert!(sim.begin_hold_expansion());
    sim.tick(DT_MS);
    assert_eq!(sim.highlight(), Highlight::None);
    assert!(sim.expanding());

    // Release re-zeroes the rhythm clock: progression restarts at index 0.
    sim.end_hold_expansion();
    sim.tick(DT_MS);
    assert_eq!(sim.highlight(), Highlight::Single(0));
}

#[test]
fn degenerate_input_draws_nothing() {
    let provider = StaticRhythm::new(RhythmInput::default());
    let mut sim = started(&provider);
    assert!(sim.chain().is_empty());

    // Ticks are no-ops, never errors.
    sim.tick(DT_MS);
    let frame = sim.frame();
    assert!(frame.nodes.is_empty());
    assert!(frame.segments.is_empty());
    assert_eq!(frame.highlight, Highlight::None);
}

#[test]
fn stopped_simulation_does_not_advance() {
    let provider = four_even();
    let mut sim = started(&provider);
    sim.tick(DT_MS);
    sim.stop_animation();
    let elapsed_phase = sim.phase();
    for _ in 0..100 {
        sim.tick(DT_MS);
    }
    assert_eq!(sim.phase(), elapsed_phase);

    Ticker::start(&mut sim);
    for _ in 0..16 {
        sim.tick(DT_MS);
    }
    assert_eq!(sim.phase(), Phase::Connecting);
}
