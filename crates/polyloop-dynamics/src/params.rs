//! Per-phase physics parameter presets.

/// Tuning knobs for one physics regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    /// Constraint correction strength in (0, 1].
    pub tension: f64,
    /// Verlet velocity retention per tick.
    pub damping: f64,
    /// Relaxation passes per tick.
    pub iterations: usize,
}

impl PhysicsParams {
    /// Loose regime used while the loop is still forming (hanging and
    /// connecting): low tension so the Bezier-driven end node does not fight
    /// the constraints.
    pub const PRE_SETTLE: PhysicsParams = PhysicsParams {
        tension: 0.3,
        damping: 0.995,
        iterations: 8,
    };

    /// Stiff regime once the loop is closed.
    pub const SETTLE: PhysicsParams = PhysicsParams {
        tension: 0.9,
        damping: 0.96,
        iterations: 15,
    };

    /// Regime while the expansion overlay is held.
    pub const EXPAND: PhysicsParams = PhysicsParams {
        tension: 0.8,
        damping: 0.985,
        iterations: 15,
    };
}

/// Fixed multiplier applied to active forces inside the Verlet step.
pub const FORCE_STEP: f64 = 0.05;

/// Outward displacement per tick for the expansion push, world units.
pub const EXPANSION_PUSH: f64 = 2.5;

/// Extra relaxation passes after the expansion push.
pub const EXPANSION_EXTRA_PASSES: usize = 12;
