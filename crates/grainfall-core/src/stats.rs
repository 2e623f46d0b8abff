//! Simulation statistics collection trait

/// Trait for collecting simulation statistics
///
/// The gravity step reports every move through this sink so hosts can count
/// activity without the core owning any counters.
pub trait SimStats {
    /// Record that a particle moved to a neighbouring cell
    fn record_particle_moved(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_particle_moved(&mut self) {}
}

/// Counts moves
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoveCounter {
    pub moved: u64,
}

impl SimStats for MoveCounter {
    fn record_particle_moved(&mut self) {
        self.moved += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_stats_record_particle_moved() {
        let mut stats = NoopStats;
        stats.record_particle_moved();
        stats.record_particle_moved();
    }

    #[test]
    fn test_move_counter() {
        let mut stats = MoveCounter::default();
        for _ in 0..5 {
            stats.record_particle_moved();
        }
        assert_eq!(stats.moved, 5);
    }
}
