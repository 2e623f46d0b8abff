//! Gravity step - per-tick movement rules for sand and water
//!
//! The grid is scanned bottom row first, left to right. A particle that moves
//! lands either in a row that was already scanned or in a cell flagged as
//! `updated`, so nothing moves twice in one tick.

use grainfall_simulation::ParticleKind;

use crate::canvas::Canvas;
use crate::stats::SimStats;

/// Cellular automata updater for gravity-affected particles
pub struct GravityUpdater;

impl GravityUpdater {
    /// Advance the whole canvas by one tick
    pub fn tick(canvas: &mut Canvas, stats: &mut dyn SimStats) {
        let (width, height) = (canvas.width(), canvas.height());

        for row in (0..height).rev() {
            for col in 0..width {
                let particle = canvas[(row, col)];
                if particle.updated || !particle.falls() {
                    continue;
                }
                match particle.kind {
                    ParticleKind::Sand => Self::update_sand(canvas, row, col, stats),
                    ParticleKind::Water => Self::update_water(canvas, row, col, stats),
                    _ => {}
                }
            }
        }

        canvas.reset_updated();
    }

    /// Sand falls down, then down-left, then down-right
    ///
    /// Water in the target cell does not block: the sand swaps with it and the
    /// displaced water gets its own move from the sand's old cell.
    pub fn update_sand(canvas: &mut Canvas, row: usize, col: usize, stats: &mut dyn SimStats) {
        let below = row + 1;
        if below >= canvas.height() {
            return;
        }

        let candidates = [
            Some(col),
            col.checked_sub(1),
            (col + 1 < canvas.width()).then_some(col + 1),
        ];

        for target in candidates.into_iter().flatten() {
            match canvas[(below, target)].kind {
                ParticleKind::Air => {
                    Self::move_particle(canvas, (row, col), (below, target), stats);
                    return;
                }
                ParticleKind::Water => {
                    Self::move_particle(canvas, (row, col), (below, target), stats);
                    Self::update_water(canvas, row, col, stats);
                    return;
                }
                _ => {}
            }
        }
    }

    /// Water falls down, then down-left or down-right, then flows sideways
    ///
    /// When both lower diagonals are open the water waits instead of picking
    /// a side.
    pub fn update_water(canvas: &mut Canvas, row: usize, col: usize, stats: &mut dyn SimStats) {
        let below = (row + 1 < canvas.height()).then_some(row + 1);
        let left = col.checked_sub(1);
        let right = (col + 1 < canvas.width()).then_some(col + 1);

        if let Some(below) = below {
            if canvas[(below, col)].is_air() {
                Self::move_particle(canvas, (row, col), (below, col), stats);
                return;
            }

            let down_left = left.filter(|&c| canvas[(below, c)].is_air());
            let down_right = right.filter(|&c| canvas[(below, c)].is_air());
            match (down_left, down_right) {
                (Some(_), Some(_)) => return,
                (Some(c), None) | (None, Some(c)) => {
                    Self::move_particle(canvas, (row, col), (below, c), stats);
                    return;
                }
                (None, None) => {}
            }
        }

        for side in [left, right].into_iter().flatten() {
            if canvas[(row, side)].is_air() {
                Self::move_particle(canvas, (row, col), (row, side), stats);
                return;
            }
        }
    }

    fn move_particle(
        canvas: &mut Canvas,
        from: (usize, usize),
        to: (usize, usize),
        stats: &mut dyn SimStats,
    ) {
        canvas.swap(from, to);
        stats.record_particle_moved();
    }
}
