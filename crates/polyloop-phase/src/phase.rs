//! Lifecycle state machine: hanging -> connecting -> settling, with the
//! expansion overlay toggled on top of settling.

use polyloop_math::{Vec2, ease_out_quad, quadratic_bezier};

/// Duration of the hanging phase, milliseconds.
pub const HANGING_MS: f64 = 2000.0;
/// Duration of the connecting phase, milliseconds.
pub const CONNECTING_MS: f64 = 3000.0;
/// Height of the connecting Bezier arc above the straight path, world units.
pub const CONNECT_ARC_HEIGHT: f64 = 80.0;

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial rest; only the camera moves.
    Hanging,
    /// The free end travels toward node 0 along a Bezier arc.
    Connecting,
    /// Closed-loop physics; open-ended.
    Settling,
}

/// Transition emitted by `advance`, at most one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Hanging finished; the caller pins the free end and installs the
    /// connecting path.
    ConnectingStarted,
    /// Connecting finished; the caller closes the loop, unpins the ends and
    /// zeroes the rhythm clock.
    LoopClosed,
}

/// Deterministic quadratic-Bezier path for the connecting phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectPath {
    pub from: Vec2,
    pub ctrl: Vec2,
    pub to: Vec2,
}

impl ConnectPath {
    /// Path from the free end's hanging position to node 0's position, with
    /// the control point at the raised midpoint.
    pub fn new(from: Vec2, to: Vec2) -> Self {
        let ctrl = (from + to) / 2.0 - Vec2::new(0.0, CONNECT_ARC_HEIGHT);
        Self { from, ctrl, to }
    }

    /// Eased position at phase progress t in [0, 1].
    pub fn position(&self, t: f64) -> Vec2 {
        quadratic_bezier(self.from, self.ctrl, self.to, ease_out_quad(t))
    }
}

/// Time-driven phase controller.
///
/// Phase time accumulates from tick deltas, so transitions are deterministic
/// for a given tick sequence regardless of wall clock.
#[derive(Debug, Clone)]
pub struct PhaseController {
    phase: Phase,
    elapsed_ms: f64,
    expanding: bool,
    connect_path: Option<ConnectPath>,
}

impl PhaseController {
    /// Start a fresh lifecycle in the hanging phase.
    pub fn new() -> Self {
        Self {
            phase: Phase::Hanging,
            elapsed_ms: 0.0,
            expanding: false,
            connect_path: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Milliseconds accumulated within the current phase.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// True while the expansion overlay is held.
    pub fn expanding(&self) -> bool {
        self.expanding
    }

    /// Advance phase time and return the transition crossed, if any.
    ///
    /// A tick that overshoots a boundary still produces only one transition;
    /// overshoot carries into the next phase so total timing stays exact.
    pub fn advance(&mut self, dt_ms: f64) -> Option<PhaseEvent> {
        self.elapsed_ms += dt_ms;
        match self.phase {
            Phase::Hanging if self.elapsed_ms >= HANGING_MS => {
                self.elapsed_ms -= HANGING_MS;
                self.phase = Phase::Connecting;
                Some(PhaseEvent::ConnectingStarted)
            }
            Phase::Connecting if self.elapsed_ms >= CONNECTING_MS => {
                self.elapsed_ms -= CONNECTING_MS;
                self.phase = Phase::Settling;
                self.connect_path = None;
                Some(PhaseEvent::LoopClosed)
            }
            _ => None,
        }
    }

    /// Install the connecting path when `ConnectingStarted` fires.
    pub fn set_connect_path(&mut self, from: Vec2, to: Vec2) {
        self.connect_path = Some(ConnectPath::new(from, to));
    }

    /// Position override for the free end during connecting.
    pub fn connect_position(&self) -> Option<Vec2> {
        if self.phase != Phase::Connecting {
            return None;
        }
        let t = (self.elapsed_ms / CONNECTING_MS).clamp(0.0, 1.0);
        self.connect_path.map(|path| path.position(t))
    }

    /// Engage the expansion overlay; only valid while settling.
    ///
    /// Returns whether the overlay state changed.
    pub fn begin_expansion(&mut self) -> bool {
        if self.phase != Phase::Settling || self.expanding {
            return false;
        }
        self.expanding = true;
        true
    }

    /// Release the expansion overlay. Returns whether it was engaged.
    pub fn end_expansion(&mut self) -> bool {
        let was = self.expanding;
        self.expanding = false;
        was
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phase_timing_is_exact() {
        let mut ctl = PhaseController::new();
        // 1999 ms in: still hanging.
        assert!(ctl.advance(1999.0).is_none());
        assert_eq!(ctl.phase(), Phase::Hanging);
        // Crossing 2000 ms flips to connecting.
        assert_eq!(ctl.advance(1.0), Some(PhaseEvent::ConnectingStarted));
        assert_eq!(ctl.phase(), Phase::Connecting);
        // Connecting lasts exactly 3000 ms more.
        assert!(ctl.advance(2999.0).is_none());
        assert_eq!(ctl.advance(1.0), Some(PhaseEvent::LoopClosed));
        assert_eq!(ctl.phase(), Phase::Settling);
    }

    #[test]
    fn test_overshoot_carries_into_next_phase() {
        let mut ctl = PhaseController::new();
        // One big tick past the hanging boundary.
        assert_eq!(ctl.advance(2500.0), Some(PhaseEvent::ConnectingStarted));
        assert_relative_eq!(ctl.elapsed_ms(), 500.0);
        // Total connecting time is still 3000 ms from the boundary.
        assert!(ctl.advance(2499.0).is_none());
        assert_eq!(ctl.advance(1.0), Some(PhaseEvent::LoopClosed));
    }

    #[test]
    fn test_connect_path_endpoints() {
        let from = Vec2::new(300.0, 120.0);
        let to = Vec2::new(100.0, 120.0);
        let path = ConnectPath::new(from, to);
        assert_relative_eq!(path.position(0.0), from);
        assert_relative_eq!(path.position(1.0), to);
        // Arc rises above the straight line (screen y grows downward).
        assert!(path.position(0.5).y < from.y);
    }

    #[test]
    fn test_connect_position_only_while_connecting() {
        let mut ctl = PhaseController::new();
        ctl.set_connect_path(Vec2::zeros(), Vec2::new(10.0, 0.0));
        assert!(ctl.connect_position().is_none()); // hanging

        ctl.advance(2000.0);
        ctl.set_connect_path(Vec2::zeros(), Vec2::new(10.0, 0.0));
        assert!(ctl.connect_position().is_some());

        ctl.advance(3000.0);
        assert!(ctl.connect_position().is_none()); // settling
    }

    #[test]
    fn test_expansion_only_while_settling() {
        let mut ctl = PhaseController::new();
        assert!(!ctl.begin_expansion());
        ctl.advance(2000.0);
        assert!(!ctl.begin_expansion());
        ctl.advance(3000.0);
        assert!(ctl.begin_expansion());
        assert!(ctl.expanding());
        assert!(!ctl.begin_expansion()); // already held
        assert!(ctl.end_expansion());
        assert!(!ctl.end_expansion()); // already released
    }
}
