//! Simulation driver: one synchronous physics step per tick.

use crate::config::{ConfigError, Result, SimConfig};
use crate::frame::RenderFrame;
use log::debug;
use polyloop_camera::CameraController;
use polyloop_dynamics::{ForceField, PhysicsParams, expansion_step, integrate, relax};
use polyloop_math::Vec2;
use polyloop_model::{Chain, ChainBuilder};
use polyloop_phase::{
    Highlight, Mode, ModeController, Phase, PhaseController, PhaseEvent, RhythmClock,
};
use polyloop_rhythm::{LayerId, RhythmDataProvider, RhythmInput};

/// The complete simulation: chain, force field, phase machine, mode
/// strategies, camera and configuration, advanced together once per tick.
///
/// Single-threaded and cooperative: every mutation happens synchronously
/// inside `tick`, and control-surface writes land between ticks.
pub struct Simulation {
    input: RhythmInput,
    chain: Chain,
    field: ForceField,
    phases: PhaseController,
    clock: RhythmClock,
    modes: ModeController,
    camera: CameraController,
    config: SimConfig,
    highlight: Highlight,
    running: bool,
    field_dirty: bool,
}

impl Simulation {
    /// Build a simulation from injected rhythm data and a viewport size.
    ///
    /// Degenerate rhythm input yields an empty chain: ticks and frames
    /// become no-ops rather than errors.
    pub fn new(provider: &dyn RhythmDataProvider, viewport_w: f64, viewport_h: f64) -> Self {
        let mut sim = Self {
            input: RhythmInput::default(),
            chain: Chain::empty(),
            field: ForceField::new(),
            phases: PhaseController::new(),
            clock: RhythmClock::new(),
            modes: ModeController::new(),
            camera: CameraController::new(viewport_w, viewport_h),
            config: SimConfig::default(),
            highlight: Highlight::None,
            running: false,
            field_dirty: true,
        };
        sim.rebuild(provider);
        sim
    }

    /// Rebuild the chain from fresh rhythm data, restarting the lifecycle.
    ///
    /// Mode selection survives; anchors locks do not (the lock candidates
    /// belong to the old input).
    pub fn rebuild(&mut self, provider: &dyn RhythmDataProvider) {
        self.input = provider.rhythm();
        self.chain = ChainBuilder::new().build(&self.input.spacings);
        self.phases = PhaseController::new();
        self.clock.zero();
        self.highlight = Highlight::None;
        self.field_dirty = true;

        let mode = self.modes.mode();
        self.modes = ModeController::new();
        self.modes.set_mode(mode, &self.input);
        self.refresh_pins();

        debug!(
            "rebuilt chain: {} nodes, grid {}",
            self.chain.node_count(),
            self.input.grid_size
        );
    }

    // ---- control surface -------------------------------------------------

    /// Begin advancing on ticks.
    pub fn start_animation(&mut self) {
        self.running = true;
        debug!("animation started");
    }

    /// Stop advancing; no partial tick is applied.
    pub fn stop_animation(&mut self) {
        self.running = false;
        debug!("animation stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Set the rhythm cycle duration in seconds.
    pub fn set_cycle_duration(&mut self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "cycle duration",
            });
        }
        if seconds <= 0.0 {
            return Err(ConfigError::TooSmall {
                name: "cycle duration",
                min: 0.0,
            });
        }
        self.config.cycle_duration_s = seconds;
        Ok(())
    }

    /// Set the force amplitude multiplier.
    ///
    /// Non-finite input is rejected; finite input is clamped to the valid
    /// range before use.
    pub fn set_force_amplitude(&mut self, amplitude: f64) -> Result<()> {
        if !amplitude.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "force amplitude",
            });
        }
        self.config.force_amplitude = amplitude.clamp(
            polyloop_dynamics::force::MIN_AMPLITUDE,
            polyloop_dynamics::force::MAX_AMPLITUDE,
        );
        self.field_dirty = true;
        Ok(())
    }

    /// Override one layer's force direction angle, radians.
    pub fn set_layer_direction(&mut self, layer: LayerId, angle: f64) -> Result<()> {
        if !angle.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "layer direction",
            });
        }
        self.config.layer_directions[layer.index()] = angle;
        self.field_dirty = true;
        Ok(())
    }

    /// Switch advanced mode; a pure strategy swap plus anchors side effects.
    pub fn set_mode(&mut self, mode: Mode) {
        self.modes.set_mode(mode, &self.input);
        self.config.mode = mode;
        self.refresh_pins();
        debug!("mode set to {mode:?}");
    }

    /// Toggle one layer's anchor lock (anchors mode only).
    pub fn toggle_layer_lock(&mut self, layer: LayerId) -> bool {
        let changed = self.modes.toggle_layer_lock(layer, &self.input);
        if changed {
            self.refresh_pins();
        }
        changed
    }

    /// Toggle a nested-ratio lock (anchors mode only; unknown keys are
    /// rejected).
    pub fn toggle_ratio_lock(&mut self, key: (LayerId, LayerId)) -> bool {
        let changed = self.modes.toggle_ratio_lock(key, &self.input);
        if changed {
            self.refresh_pins();
        }
        changed
    }

    /// Enable or disable debug force vectors in the render frame.
    pub fn set_debug_forces(&mut self, enabled: bool) {
        self.config.debug_forces = enabled;
    }

    /// Resize the camera viewport (host window change).
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    /// Engage the expansion overlay (held until released; settling only).
    pub fn begin_hold_expansion(&mut self) -> bool {
        self.phases.begin_expansion()
    }

    /// Release the expansion overlay, re-zeroing the rhythm clock so visual
    /// phase restarts cleanly after the pause.
    pub fn end_hold_expansion(&mut self) {
        if self.phases.end_expansion() {
            self.clock.zero();
        }
    }

    // ---- per-tick step ---------------------------------------------------

    /// Advance the whole simulation by one tick of `dt_ms` milliseconds.
    ///
    /// Order: phase timers -> progression -> integration -> constraint
    /// passes -> camera. No step spans multiple ticks.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.running || self.chain.is_empty() || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        self.apply_config();

        let event = self.phases.advance(dt_ms);
        match event {
            Some(PhaseEvent::ConnectingStarted) => self.on_connecting_started(),
            Some(PhaseEvent::LoopClosed) => self.on_loop_closed(),
            None => {}
        }

        let n = self.input.spacings.len();
        match self.phases.phase() {
            Phase::Hanging => {
                self.highlight = Highlight::None;
            }
            Phase::Connecting => {
                self.highlight = Highlight::None;
                if let (Some(pos), Some(last)) =
                    (self.phases.connect_position(), self.chain.last_index())
                {
                    self.chain.nodes[last].teleport(pos);
                }
                integrate(&mut self.chain, PhysicsParams::PRE_SETTLE, &[]);
                relax(&mut self.chain, PhysicsParams::PRE_SETTLE);
            }
            Phase::Settling if self.phases.expanding() => {
                // Overlay suspends normal forces; in anchors mode the clock
                // holds as well, elsewhere release will re-zero it anyway.
                if !self.modes.freeze_during_expansion() {
                    self.clock.advance(dt_ms / 1000.0);
                }
                self.highlight = Highlight::None;
                expansion_step(&mut self.chain, PhysicsParams::EXPAND);
            }
            Phase::Settling => {
                // The tick that closed the loop starts the cycle at zero.
                if event.is_none() {
                    self.clock.advance(dt_ms / 1000.0);
                }
                self.highlight = self.modes.active(self.clock.position(n), n);
                let forces: Vec<(usize, Vec2)> = self
                    .highlight
                    .indices()
                    .into_iter()
                    .map(|i| (i, self.field.force_at(i).vector))
                    .collect();
                integrate(&mut self.chain, PhysicsParams::SETTLE, &forces);
                relax(&mut self.chain, PhysicsParams::SETTLE);
            }
        }

        self.camera.update(self.chain.bounds());
    }

    /// Produce the renderer hand-off for the current state.
    pub fn frame(&self) -> RenderFrame {
        if self.chain.is_empty() {
            return RenderFrame::empty(self.camera.state());
        }
        let nodes = self
            .chain
            .nodes
            .iter()
            .map(|node| self.camera.apply(node.position))
            .collect();
        let segments = self
            .chain
            .segments
            .iter()
            .map(|seg| (seg.a, seg.b))
            .collect();
        let forces = self.config.debug_forces.then(|| {
            self.highlight
                .indices()
                .into_iter()
                .map(|i| (i, self.field.force_at(i).vector))
                .collect()
        });
        RenderFrame {
            nodes,
            segments,
            highlight: self.highlight,
            forces,
            camera: self.camera.state(),
        }
    }

    // ---- accessors -------------------------------------------------------

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn phase(&self) -> Phase {
        self.phases.phase()
    }

    pub fn expanding(&self) -> bool {
        self.phases.expanding()
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Anchors lock state, for control-panel display.
    pub fn anchors(&self) -> &polyloop_phase::AnchorState {
        self.modes.anchors()
    }

    // ---- internals -------------------------------------------------------

    /// Push the config snapshot into the components that consume it.
    fn apply_config(&mut self) {
        self.clock.set_cycle_duration(self.config.cycle_duration_s);
        if self.field_dirty {
            self.field.set_amplitude(self.config.force_amplitude);
            for layer in LayerId::ALL {
                self.field
                    .set_direction(layer, self.config.layer_directions[layer.index()]);
            }
            self.field.recompute(&self.input, self.chain.scale_factor);
            self.field_dirty = false;
        }
    }

    fn on_connecting_started(&mut self) {
        let Some(last) = self.chain.last_index() else {
            return;
        };
        let from = self.chain.nodes[last].position;
        let to = self.chain.nodes[0].position;
        self.phases.set_connect_path(from, to);
        self.refresh_pins();
        debug!("connecting started");
    }

    fn on_loop_closed(&mut self) {
        self.chain.close_loop();
        self.clock.zero();
        self.refresh_pins();
        debug!("loop closed, settling");
    }

    /// Reapply pin state: lifecycle pins plus anchors-derived pins.
    fn refresh_pins(&mut self) {
        let last = match self.chain.last_index() {
            Some(last) => last,
            None => return,
        };
        let anchor_pins = &self.modes.anchors().pinned;
        for (i, node) in self.chain.nodes.iter_mut().enumerate() {
            let lifecycle_pin = match self.phases.phase() {
                Phase::Hanging => i == 0,
                Phase::Connecting => i == 0 || i == last,
                Phase::Settling => false,
            };
            node.pinned = lifecycle_pin || anchor_pins.contains(&i);
        }
    }
}
