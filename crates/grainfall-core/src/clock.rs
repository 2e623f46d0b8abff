//! Fixed-timestep tick accumulator
//!
//! Frame time is accumulated and spent in whole ticks, so the simulation runs
//! at the same speed regardless of frame rate. A frame may run zero or more
//! ticks; the remainder carries over to the next frame.

/// Converts elapsed frame time into a number of physics ticks
#[derive(Clone, Debug)]
pub struct TickClock {
    tick_duration: f32,
    accumulated: f32,
}

impl TickClock {
    /// Clock running `tick_rate` ticks per second (at least 1)
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_duration: 1.0 / tick_rate.max(1) as f32,
            accumulated: 0.0,
        }
    }

    /// Seconds per tick
    pub fn tick_duration(&self) -> f32 {
        self.tick_duration
    }

    /// Unspent time carried over from previous frames
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Add a frame's elapsed seconds and return how many ticks are due
    ///
    /// Negative and non-finite deltas count as zero. Time beyond
    /// `u32::MAX` ticks is dropped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulated += dt;
        }

        let due = (self.accumulated / self.tick_duration).floor();
        if due < 1.0 {
            return 0;
        }

        // Float to int casts saturate
        let ticks = due as u32;
        let spent = ticks as f32 * self.tick_duration;
        self.accumulated = (self.accumulated - spent).clamp(0.0, self.tick_duration);
        ticks
    }

    /// Drop any carried-over time
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_tick_duration() {
        let mut clock = TickClock::new(64);
        assert_eq!(clock.tick_duration(), 1.0 / 64.0);
        assert_eq!(clock.advance(1.0 / 64.0), 1);
        assert_eq!(clock.accumulated(), 0.0);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = TickClock::new(64);
        assert_eq!(clock.advance(0.5 / 64.0), 0);
        assert_eq!(clock.advance(0.5 / 64.0), 1);
        assert_eq!(clock.advance(0.25 / 64.0), 0);
        assert_eq!(clock.accumulated(), 0.25 / 64.0);
    }

    #[test]
    fn test_long_frame_runs_many_ticks() {
        let mut clock = TickClock::new(64);
        assert_eq!(clock.advance(1.0), 64);
        assert_eq!(clock.advance(2.5 / 64.0), 2);
    }

    #[test]
    fn test_bad_deltas_are_ignored() {
        let mut clock = TickClock::new(64);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
        assert_eq!(clock.accumulated(), 0.0);
    }

    #[test]
    fn test_huge_delta_terminates() {
        let mut clock = TickClock::new(64);
        assert_eq!(clock.advance(1.0e6), 64_000_000);
        assert!(clock.accumulated() < clock.tick_duration());

        assert_eq!(clock.advance(f32::MAX), u32::MAX);
        assert!(clock.accumulated() <= clock.tick_duration());
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let clock = TickClock::new(0);
        assert_eq!(clock.tick_duration(), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = TickClock::new(64);
        clock.advance(0.5 / 64.0);
        clock.reset();
        assert_eq!(clock.advance(0.5 / 64.0), 0);
    }
}
