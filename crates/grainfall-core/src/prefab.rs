//! Canvas prefab - the grid compressed into draw rectangles
//!
//! Instead of drawing every visible cell separately, runs of identical cells
//! are merged into rectangles. The merge is greedy:
//! 1. Scan cells row-major and seed a 1x1 rectangle at each unclaimed visible cell
//! 2. Alternately try to grow one column right and one row down; a strip is
//!    accepted only if every cell matches the seed and is unclaimed
//! 3. Stop when neither direction can grow, emit, claim its cells
//!
//! The cover is scan-order dependent and not globally minimal, but every
//! visible cell ends up in exactly one rectangle.

use grainfall_simulation::{Particle, Rgba};

use crate::canvas::Canvas;

/// Rectangle in grid space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl CellRect {
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.rows && col >= self.col && col < self.col + self.cols
    }

    pub fn overlaps(&self, other: &CellRect) -> bool {
        self.row < other.row + other.rows
            && other.row < self.row + self.rows
            && self.col < other.col + other.cols
            && other.col < self.col + self.cols
    }

    /// Scale to screen pixels
    pub fn to_pixels(&self, particle_size: u32) -> PixelRect {
        PixelRect {
            x: self.col as u32 * particle_size,
            y: self.row as u32 * particle_size,
            width: self.cols as u32 * particle_size,
            height: self.rows as u32 * particle_size,
        }
    }
}

/// Rectangle in screen pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One merged rectangle and the color it is drawn with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefabRect {
    pub cells: CellRect,
    pub color: Rgba,
}

/// Merge the visible cells of `canvas` into rectangles
pub fn coalesce(canvas: &Canvas) -> Vec<PrefabRect> {
    let mut rects = Vec::new();
    coalesce_into(canvas, &mut rects);
    rects
}

/// Like [`coalesce`], reusing the allocation of `out`
pub fn coalesce_into(canvas: &Canvas, out: &mut Vec<PrefabRect>) {
    out.clear();

    let (width, height) = (canvas.width(), canvas.height());
    let mut claimed = vec![false; width * height];

    for row in 0..height {
        for col in 0..width {
            let seed = canvas[(row, col)];
            if claimed[row * width + col] || !seed.is_visible() {
                continue;
            }
            claimed[row * width + col] = true;

            let (mut rows, mut cols) = (1, 1);
            let (mut width_done, mut height_done) = (false, false);

            loop {
                if row + rows >= height {
                    height_done = true;
                }
                if col + cols >= width {
                    width_done = true;
                }
                if width_done && height_done {
                    break;
                }

                if !width_done {
                    let c = col + cols;
                    if (row..row + rows).all(|r| claimable(canvas, &claimed, r, c, &seed)) {
                        for r in row..row + rows {
                            claimed[r * width + c] = true;
                        }
                        cols += 1;
                    } else {
                        width_done = true;
                    }
                }

                if !height_done {
                    let r = row + rows;
                    if (col..col + cols).all(|c| claimable(canvas, &claimed, r, c, &seed)) {
                        for c in col..col + cols {
                            claimed[r * width + c] = true;
                        }
                        rows += 1;
                    } else {
                        height_done = true;
                    }
                }
            }

            out.push(PrefabRect {
                cells: CellRect {
                    row,
                    col,
                    rows,
                    cols,
                },
                color: seed.color,
            });
        }
    }
}

#[inline]
fn claimable(canvas: &Canvas, claimed: &[bool], row: usize, col: usize, seed: &Particle) -> bool {
    let cell = &canvas[(row, col)];
    !claimed[row * canvas.width() + col] && cell.kind == seed.kind && cell.color == seed.color
}

/// Render list rebuilt from the canvas every tick
#[derive(Clone, Debug)]
pub struct CanvasPrefab {
    rects: Vec<PrefabRect>,
    particle_size: u32,
}

impl CanvasPrefab {
    pub fn new(particle_size: u32) -> Self {
        Self {
            rects: Vec::new(),
            particle_size,
        }
    }

    /// Recompute from scratch, keeping the buffer
    pub fn rebuild(&mut self, canvas: &Canvas) {
        coalesce_into(canvas, &mut self.rects);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn particle_size(&self) -> u32 {
        self.particle_size
    }

    /// Rectangles in grid space
    pub fn rects(&self) -> &[PrefabRect] {
        &self.rects
    }

    /// Rectangles in screen pixels, in draw order
    pub fn pixel_rects(&self) -> impl Iterator<Item = (PixelRect, Rgba)> + '_ {
        self.rects
            .iter()
            .map(move |rect| (rect.cells.to_pixels(self.particle_size), rect.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainfall_simulation::ParticleKind;

    fn covered_cells(rects: &[PrefabRect]) -> usize {
        rects.iter().map(|r| r.cells.area()).sum()
    }

    #[test]
    fn test_empty_canvas_is_four_border_strips() {
        let canvas = Canvas::new(6, 5).unwrap();
        let rects = coalesce(&canvas);

        // Top row grows right to the full width, then the left column grows down
        assert_eq!(rects.len(), 4);
        assert_eq!(
            rects[0].cells,
            CellRect {
                row: 0,
                col: 0,
                rows: 1,
                cols: 6
            }
        );
        assert_eq!(covered_cells(&rects), 2 * 6 + 2 * 3);
        assert!(rects.iter().all(|r| r.color == ParticleKind::Border.color()));
    }

    #[test]
    fn test_seed_grows_width_and_height_alternately() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.fill_rect(2, 2, 3, 4, ParticleKind::Stone);
        let rects = coalesce(&canvas);

        let stone: Vec<_> = rects
            .iter()
            .filter(|r| r.color == ParticleKind::Stone.color())
            .collect();
        assert_eq!(stone.len(), 1);
        assert_eq!(
            stone[0].cells,
            CellRect {
                row: 2,
                col: 2,
                rows: 3,
                cols: 4
            }
        );
    }

    #[test]
    fn test_two_separate_blocks() {
        let mut canvas = Canvas::new(10, 6).unwrap();
        canvas.fill_rect(2, 2, 2, 2, ParticleKind::Stone);
        canvas.fill_rect(2, 6, 2, 2, ParticleKind::Stone);
        let rects = coalesce(&canvas);

        let stone: Vec<CellRect> = rects
            .iter()
            .filter(|r| r.color == ParticleKind::Stone.color())
            .map(|r| r.cells)
            .collect();
        assert_eq!(
            stone,
            vec![
                CellRect {
                    row: 2,
                    col: 2,
                    rows: 2,
                    cols: 2
                },
                CellRect {
                    row: 2,
                    col: 6,
                    rows: 2,
                    cols: 2
                },
            ]
        );
        // Air is never emitted; everything else is border
        assert_eq!(covered_cells(&rects), 8 + 2 * 10 + 2 * 4);
    }

    #[test]
    fn test_adjacent_kinds_are_not_merged() {
        let mut canvas = Canvas::new(6, 4).unwrap();
        canvas.set(1, 1, Particle::SAND);
        canvas.set(1, 2, Particle::WATER);
        canvas.set(2, 1, Particle::SAND);
        canvas.set(2, 2, Particle::WATER);
        let rects = coalesce(&canvas);

        let sand = rects
            .iter()
            .find(|r| r.color == ParticleKind::Sand.color())
            .unwrap();
        assert_eq!(
            sand.cells,
            CellRect {
                row: 1,
                col: 1,
                rows: 2,
                cols: 1
            }
        );
        let water = rects
            .iter()
            .find(|r| r.color == ParticleKind::Water.color())
            .unwrap();
        assert_eq!(water.cells.area(), 2);
    }

    #[test]
    fn test_rects_are_disjoint() {
        let mut canvas = Canvas::new(12, 9).unwrap();
        canvas.fill_rect(1, 1, 3, 10, ParticleKind::Water);
        canvas.fill_rect(4, 3, 4, 2, ParticleKind::Wood);
        canvas.set(5, 8, Particle::SAND);
        let rects = coalesce(&canvas);

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.cells.overlaps(&b.cells), "{a:?} overlaps {b:?}");
            }
        }
        let visible = canvas.cells().iter().filter(|p| p.is_visible()).count();
        assert_eq!(covered_cells(&rects), visible);
    }

    #[test]
    fn test_prefab_scales_to_pixels() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        canvas.set(2, 2, Particle::SAND);
        let mut prefab = CanvasPrefab::new(3);
        prefab.rebuild(&canvas);

        let sand = prefab
            .pixel_rects()
            .find(|(_, color)| *color == ParticleKind::Sand.color())
            .map(|(rect, _)| rect)
            .unwrap();
        assert_eq!(
            sand,
            PixelRect {
                x: 6,
                y: 6,
                width: 3,
                height: 3
            }
        );
    }

    #[test]
    fn test_rebuild_replaces_previous_list() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        let mut prefab = CanvasPrefab::new(2);
        prefab.rebuild(&canvas);
        let border_only = prefab.len();

        canvas.set(2, 2, Particle::STONE);
        prefab.rebuild(&canvas);
        assert_eq!(prefab.len(), border_only + 1);

        canvas.clear();
        prefab.rebuild(&canvas);
        assert_eq!(prefab.len(), border_only);
    }
}
