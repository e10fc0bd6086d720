//! Rhythm clock: maps accumulated tick time to a position in the cycle.

/// Default cycle duration, seconds.
pub const DEFAULT_CYCLE_S: f64 = 2.0;

/// Accumulating clock over the rhythm cycle.
///
/// Position is `(elapsed mod cycle) / cycle * n` — a fractional index into
/// the spacing sequence. The clock is zeroed when the loop closes and again
/// whenever the expansion overlay is released, so visual phase restarts
/// cleanly after a pause.
#[derive(Debug, Clone, Copy)]
pub struct RhythmClock {
    elapsed_s: f64,
    cycle_s: f64,
}

impl RhythmClock {
    pub fn new() -> Self {
        Self {
            elapsed_s: 0.0,
            cycle_s: DEFAULT_CYCLE_S,
        }
    }

    /// Cycle duration in seconds.
    pub fn cycle_duration(&self) -> f64 {
        self.cycle_s
    }

    /// Set the cycle duration. The caller validates; values <= 0 are ignored
    /// here as a last line of defense.
    pub fn set_cycle_duration(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.cycle_s = seconds;
        }
    }

    /// Advance the clock by a tick delta.
    pub fn advance(&mut self, dt_s: f64) {
        self.elapsed_s += dt_s;
    }

    /// Restart the cycle from zero.
    pub fn zero(&mut self) {
        self.elapsed_s = 0.0;
    }

    /// Fractional position in [0, n) for a spacing count of n.
    pub fn position(&self, n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        (self.elapsed_s.rem_euclid(self.cycle_s)) / self.cycle_s * n as f64
    }
}

impl Default for RhythmClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_scales_with_n() {
        let mut clock = RhythmClock::new();
        clock.set_cycle_duration(4.0);
        clock.advance(1.0);
        assert_relative_eq!(clock.position(4), 1.0);
        assert_relative_eq!(clock.position(8), 2.0);
    }

    #[test]
    fn test_position_wraps_at_cycle() {
        let mut clock = RhythmClock::new();
        clock.set_cycle_duration(2.0);
        clock.advance(5.0); // 2.5 cycles
        assert_relative_eq!(clock.position(4), 2.0);
    }

    #[test]
    fn test_invalid_cycle_duration_retained() {
        let mut clock = RhythmClock::new();
        clock.set_cycle_duration(3.0);
        clock.set_cycle_duration(0.0);
        clock.set_cycle_duration(-1.0);
        clock.set_cycle_duration(f64::NAN);
        assert_relative_eq!(clock.cycle_duration(), 3.0);
    }

    #[test]
    fn test_zero_restarts_cycle() {
        let mut clock = RhythmClock::new();
        clock.advance(1.3);
        clock.zero();
        assert_relative_eq!(clock.position(4), 0.0);
    }
}
