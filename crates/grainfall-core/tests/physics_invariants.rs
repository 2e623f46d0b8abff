//! Randomized invariant checks for the gravity step, coalescer and brush
//!
//! Every test uses a seeded RNG so failures reproduce.

use glam::IVec2;
use grainfall_core::simulation::{Particle, ParticleKind};
use grainfall_core::{Brush, Canvas, GravityUpdater, MoveCounter, NoopStats, coalesce};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

const KINDS: [ParticleKind; 5] = [
    ParticleKind::Air,
    ParticleKind::Sand,
    ParticleKind::Water,
    ParticleKind::Stone,
    ParticleKind::Wood,
];

fn random_canvas(rng: &mut Xoshiro256StarStar, width: usize, height: usize) -> Canvas {
    let mut canvas = Canvas::new(width, height).unwrap();
    for row in 1..height - 1 {
        for col in 1..width - 1 {
            let kind = KINDS[rng.gen_range(0..KINDS.len())];
            canvas.set(row, col, Particle::of(kind));
        }
    }
    canvas
}

fn kind_counts(canvas: &Canvas) -> Vec<usize> {
    ParticleKind::ALL.iter().map(|&k| canvas.count(k)).collect()
}

fn border_cells(canvas: &Canvas) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for row in 0..canvas.height() {
        for col in 0..canvas.width() {
            if canvas.is_border_cell(row, col) {
                cells.push((row, col));
            }
        }
    }
    cells
}

#[test]
fn test_coalesce_covers_visible_cells_exactly_once() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(12345);
    for _ in 0..20 {
        let width = rng.gen_range(3..40);
        let height = rng.gen_range(3..40);
        let canvas = random_canvas(&mut rng, width, height);

        let mut hits = vec![0u32; width * height];
        for rect in coalesce(&canvas) {
            let cells = rect.cells;
            for row in cells.row..cells.row + cells.rows {
                for col in cells.col..cells.col + cells.cols {
                    let particle = canvas[(row, col)];
                    assert_eq!(particle.color, rect.color, "color mismatch at ({row}, {col})");
                    hits[row * width + col] += 1;
                }
            }
        }

        for (idx, particle) in canvas.cells().iter().enumerate() {
            let expected = u32::from(particle.is_visible());
            assert_eq!(hits[idx], expected, "cell {idx} on {width}x{height}");
        }
    }
}

#[test]
fn test_tick_conserves_kind_counts() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    for _ in 0..10 {
        let mut canvas = random_canvas(&mut rng, 32, 24);
        let before = kind_counts(&canvas);
        for _ in 0..50 {
            GravityUpdater::tick(&mut canvas, &mut NoopStats);
            assert_eq!(kind_counts(&canvas), before);
        }
    }
}

#[test]
fn test_no_updated_flags_survive_a_tick() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    let mut canvas = random_canvas(&mut rng, 48, 48);
    for _ in 0..30 {
        GravityUpdater::tick(&mut canvas, &mut NoopStats);
        assert!(canvas.cells().iter().all(|p| !p.updated));
    }
}

#[test]
fn test_each_particle_moves_at_most_once_per_tick() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(99);
    let mut canvas = random_canvas(&mut rng, 40, 30);
    for _ in 0..20 {
        let movable = canvas.cells().iter().filter(|p| p.falls()).count() as u64;
        let mut stats = MoveCounter::default();
        GravityUpdater::tick(&mut canvas, &mut stats);
        // Displaced water may move once more after being swapped up by sand
        assert!(stats.moved <= 2 * movable);
    }
}

#[test]
fn test_border_survives_ticks_and_brush() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(2024);
    let mut canvas = random_canvas(&mut rng, 30, 20);
    let border = border_cells(&canvas);
    let mut brush = Brush::new(ParticleKind::Sand, 4, 32);

    for _ in 0..200 {
        let kind = ParticleKind::PAINTABLE[rng.gen_range(0..ParticleKind::PAINTABLE.len())];
        brush.select_kind(kind);
        brush.set_size(rng.gen_range(1..12));
        brush.set_cursor(IVec2::new(rng.gen_range(-5..35), rng.gen_range(-5..25)));
        brush.draw(&mut canvas);
        GravityUpdater::tick(&mut canvas, &mut NoopStats);

        for &(row, col) in &border {
            assert_eq!(canvas.kind_at(row, col), Some(ParticleKind::Border));
        }
    }
    assert_eq!(canvas.count(ParticleKind::Border), border.len());
}

#[test]
fn test_sand_pile_settles() {
    let mut canvas = Canvas::new(21, 21).unwrap();
    canvas.fill_rect(1, 8, 5, 5, ParticleKind::Sand);
    let sand = canvas.count(ParticleKind::Sand);

    let mut stats = MoveCounter::default();
    for _ in 0..200 {
        stats = MoveCounter::default();
        GravityUpdater::tick(&mut canvas, &mut stats);
    }
    assert_eq!(stats.moved, 0, "pile still moving");
    assert_eq!(canvas.count(ParticleKind::Sand), sand);
    // Nothing floats: every sand grain rests on something solid
    for row in 1..20 {
        for col in 1..20 {
            if canvas.kind_at(row, col) == Some(ParticleKind::Sand) {
                assert_ne!(canvas.kind_at(row + 1, col), Some(ParticleKind::Air));
            }
        }
    }
}
