//! Canvas - the bordered particle grid
//!
//! Cells are stored row-major in one contiguous `Vec`. Row 0 is the top of the
//! canvas; gravity pulls towards larger row indices. The outermost ring of
//! cells is `Border` for the lifetime of the canvas.

use glam::IVec2;
use grainfall_simulation::{Particle, ParticleKind};
use std::ops::Index;

use crate::error::ConfigError;

/// Fixed-size grid of particles
#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Particle>,
}

impl Canvas {
    /// Create a canvas with a border ring and an air interior
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }

        let mut canvas = Self {
            width,
            height,
            cells: vec![Particle::AIR; width * height],
        };
        for row in 0..height {
            for col in 0..width {
                if canvas.is_border_cell(row, col) {
                    canvas.cells[row * width + col] = Particle::BORDER;
                }
            }
        }
        Ok(canvas)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Particle] {
        &self.cells
    }

    #[inline]
    fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Whether (row, col) lies on the permanent border ring
    #[inline]
    pub fn is_border_cell(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.height || col + 1 == self.width
    }

    /// Convert a signed grid position (x = column, y = row) into indices
    pub fn cell_at(&self, pos: IVec2) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.y).ok()?;
        let col = usize::try_from(pos.x).ok()?;
        self.in_bounds(row, col).then_some((row, col))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Particle> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells.get(self.index_of(row, col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Particle> {
        if !self.in_bounds(row, col) {
            return None;
        }
        let idx = self.index_of(row, col);
        self.cells.get_mut(idx)
    }

    /// Kind at (row, col), `None` when out of bounds
    pub fn kind_at(&self, row: usize, col: usize) -> Option<ParticleKind> {
        self.get(row, col).map(|p| p.kind)
    }

    /// Overwrite a cell. Returns false when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, particle: Particle) -> bool {
        match self.get_mut(row, col) {
            Some(cell) => {
                *cell = particle;
                true
            }
            None => false,
        }
    }

    /// Place a particle on an interior cell
    ///
    /// Out-of-bounds and border targets are dropped; returns whether the
    /// cell was written.
    pub fn paint(&mut self, pos: IVec2, particle: Particle) -> bool {
        match self.cell_at(pos) {
            Some((row, col)) if !self.is_border_cell(row, col) => self.set(row, col, particle),
            _ => false,
        }
    }

    /// Fill the interior part of a rectangle; returns cells written
    pub fn fill_rect(
        &mut self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
        kind: ParticleKind,
    ) -> usize {
        let particle = Particle::of(kind);
        let row_end = row.saturating_add(rows).min(self.height.saturating_sub(1));
        let col_end = col.saturating_add(cols).min(self.width.saturating_sub(1));
        let mut written = 0;
        for r in row.max(1)..row_end {
            for c in col.max(1)..col_end {
                let idx = self.index_of(r, c);
                self.cells[idx] = particle;
                written += 1;
            }
        }
        written
    }

    /// Exchange two cells and mark the destination as updated
    ///
    /// Panics if either cell is out of bounds.
    pub fn swap(&mut self, from: (usize, usize), to: (usize, usize)) {
        let a = self.index_of(from.0, from.1);
        let b = self.index_of(to.0, to.1);
        self.cells.swap(a, b);
        self.cells[b].updated = true;
    }

    /// Clear every per-tick `updated` flag
    pub fn reset_updated(&mut self) {
        for cell in &mut self.cells {
            cell.updated = false;
        }
    }

    /// Reset the interior to air, keeping the border
    pub fn clear(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_border_cell(row, col) {
                    let idx = self.index_of(row, col);
                    self.cells[idx] = Particle::AIR;
                }
            }
        }
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: ParticleKind) -> usize {
        self.cells.iter().filter(|p| p.kind == kind).count()
    }

    /// Number of cells that are neither air nor border
    pub fn particle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|p| !p.is_air() && !p.is_border())
            .count()
    }
}

impl Index<(usize, usize)> for Canvas {
    type Output = Particle;

    /// Panics if (row, col) is out of bounds
    fn index(&self, (row, col): (usize, usize)) -> &Particle {
        assert!(self.in_bounds(row, col), "cell ({row}, {col}) out of bounds");
        &self.cells[self.index_of(row, col)]
    }
}
