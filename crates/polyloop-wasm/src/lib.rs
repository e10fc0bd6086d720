//! Browser bindings for the polyloop simulation.
//!
//! The JS host owns the render loop: it calls `tick` from its frame
//! callback and reads flat `Vec<f64>`/`Vec<u32>` buffers back for canvas
//! drawing. All control-panel events funnel through the setters here.

use polyloop::{
    Highlight, LayerId, LayerSet, Mode, Phase, RhythmInput, Simulation, StaticRhythm,
};
use wasm_bindgen::prelude::*;

fn layer_from_index(i: u8) -> Option<LayerId> {
    LayerId::from_index(i as usize)
}

#[wasm_bindgen]
pub struct WasmLoopSim {
    sim: Simulation,
}

#[wasm_bindgen]
impl WasmLoopSim {
    /// Build from raw rhythm data.
    ///
    /// `layer_masks[i]` is a 4-bit mask of the layers coinciding at spacing
    /// i (bit 0 = layer A). `pulse_counts` must have 4 entries; extra
    /// entries are ignored, missing ones read as 0.
    #[wasm_bindgen(constructor)]
    pub fn new(
        spacings: Vec<f64>,
        layer_masks: Vec<u8>,
        grid_size: u32,
        pulse_counts: Vec<u32>,
        viewport_width: f64,
        viewport_height: f64,
    ) -> WasmLoopSim {
        let mut counts = [0u32; 4];
        for (slot, &count) in counts.iter_mut().zip(pulse_counts.iter()) {
            *slot = count;
        }
        let input = RhythmInput {
            layer_map: layer_masks.iter().map(|&m| LayerSet::from_bits(m)).collect(),
            spacings,
            grid_size,
            pulse_counts: counts,
        };
        let provider = StaticRhythm::new(input);
        WasmLoopSim {
            sim: Simulation::new(&provider, viewport_width, viewport_height),
        }
    }

    pub fn start(&mut self) {
        self.sim.start_animation();
    }

    pub fn stop(&mut self) {
        self.sim.stop_animation();
    }

    /// Advance by the frame delta, milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        self.sim.tick(dt_ms);
    }

    /// Screen-space node positions as flat [x0, y0, x1, y1, ...].
    pub fn node_positions(&self) -> Vec<f64> {
        let frame = self.sim.frame();
        let mut out = Vec::with_capacity(frame.nodes.len() * 2);
        for p in frame.nodes {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }

    /// Segment endpoints as flat node-index pairs [a0, b0, a1, b1, ...].
    pub fn segment_indices(&self) -> Vec<u32> {
        let frame = self.sim.frame();
        let mut out = Vec::with_capacity(frame.segments.len() * 2);
        for (a, b) in frame.segments {
            out.push(a as u32);
            out.push(b as u32);
        }
        out
    }

    /// Active highlight indices: empty, one entry, or a pair.
    pub fn highlight_indices(&self) -> Vec<u32> {
        self.sim
            .highlight()
            .indices()
            .into_iter()
            .map(|i| i as u32)
            .collect()
    }

    /// Debug force vectors as flat [index, fx, fy, ...]; empty unless
    /// enabled via `set_debug_forces`.
    pub fn debug_forces(&self) -> Vec<f64> {
        let Some(forces) = self.sim.frame().forces else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(forces.len() * 3);
        for (i, f) in forces {
            out.push(i as f64);
            out.push(f.x);
            out.push(f.y);
        }
        out
    }

    /// Camera transform as [translation_x, translation_y, scale].
    pub fn camera(&self) -> Vec<f64> {
        let state = self.sim.camera().state();
        vec![state.translation.x, state.translation.y, state.scale]
    }

    /// Lifecycle phase: 0 hanging, 1 connecting, 2 settling.
    pub fn phase(&self) -> u8 {
        match self.sim.phase() {
            Phase::Hanging => 0,
            Phase::Connecting => 1,
            Phase::Settling => 2,
        }
    }

    pub fn is_expanding(&self) -> bool {
        self.sim.expanding()
    }

    pub fn node_count(&self) -> usize {
        self.sim.chain().node_count()
    }

    // ---- control surface -----------------------------------------------

    /// Returns false (and keeps the previous value) for invalid input.
    pub fn set_cycle_duration(&mut self, seconds: f64) -> bool {
        self.sim.set_cycle_duration(seconds).is_ok()
    }

    /// Returns false (and keeps the previous value) for non-finite input.
    pub fn set_force_amplitude(&mut self, amplitude: f64) -> bool {
        self.sim.set_force_amplitude(amplitude).is_ok()
    }

    /// 0 off, 1 mirror, 2 anchors; other values ignored.
    pub fn set_mode(&mut self, mode: u8) {
        let mode = match mode {
            0 => Mode::Off,
            1 => Mode::Mirror,
            2 => Mode::Anchors,
            _ => return,
        };
        self.sim.set_mode(mode);
    }

    pub fn set_layer_direction(&mut self, layer: u8, angle_radians: f64) -> bool {
        let Some(layer) = layer_from_index(layer) else {
            return false;
        };
        self.sim.set_layer_direction(layer, angle_radians).is_ok()
    }

    pub fn toggle_layer_lock(&mut self, layer: u8) -> bool {
        let Some(layer) = layer_from_index(layer) else {
            return false;
        };
        self.sim.toggle_layer_lock(layer)
    }

    /// Toggle the nested-ratio lock for a layer pair.
    pub fn toggle_ratio_lock(&mut self, layer_a: u8, layer_b: u8) -> bool {
        let (Some(a), Some(b)) = (layer_from_index(layer_a), layer_from_index(layer_b)) else {
            return false;
        };
        self.sim.toggle_ratio_lock((a, b))
    }

    /// Available ratio-lock pairs as flat [layer_a, layer_b, ...] indices.
    pub fn ratio_candidates(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for candidate in &self.sim.anchors().candidates {
            let (a, b) = candidate.key();
            out.push(a.index() as u8);
            out.push(b.index() as u8);
        }
        out
    }

    pub fn begin_hold_expansion(&mut self) -> bool {
        self.sim.begin_hold_expansion()
    }

    pub fn end_hold_expansion(&mut self) {
        self.sim.end_hold_expansion();
    }

    pub fn set_debug_forces(&mut self, enabled: bool) {
        self.sim.set_debug_forces(enabled);
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.sim.set_viewport(width, height);
    }

    /// Check the highlight kind without allocating: 0 none, 1 single,
    /// 2 pair.
    pub fn highlight_kind(&self) -> u8 {
        match self.sim.highlight() {
            Highlight::None => 0,
            Highlight::Single(_) => 1,
            Highlight::Pair(_, _) => 2,
        }
    }
}
