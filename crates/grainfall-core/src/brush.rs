//! Brush - disc-shaped particle painter
//!
//! The brush covers a `size x size` box whose top-left corner sits `size / 2`
//! cells up and left of the cursor. Which cells of the box belong to the disc
//! is decided once per size and cached as a mask of offsets.

use glam::IVec2;
use grainfall_simulation::{Particle, ParticleKind, Rgba};

use crate::canvas::Canvas;
use crate::config::BrushConfig;

/// Offsets (x = column, y = row) of the disc approximation for a brush size
///
/// One quadrant is tested against the radius and mirrored into the other
/// three. Odd sizes floor the distance and skip mirroring the centre row and
/// column onto themselves; even sizes round the distance.
pub fn disc_mask(size: u32) -> Vec<IVec2> {
    let size = size.max(1) as i32;
    let radius = size as f32 / 2.0;
    let centre = radius as i32;
    let odd = size % 2 == 1;
    let quadrant = (size + 1) / 2;

    let mut points = Vec::with_capacity((size * size) as usize);
    for i in 0..quadrant {
        for j in 0..quadrant {
            let distance = (radius - i as f32).hypot(radius - j as f32);
            let distance = if odd {
                distance.floor()
            } else {
                distance.round()
            };
            if distance > radius {
                continue;
            }

            let (mi, mj) = (size - i - 1, size - j - 1);
            points.push(IVec2::new(i, j));
            if odd {
                if i != centre {
                    points.push(IVec2::new(mi, j));
                }
                if j != centre {
                    points.push(IVec2::new(i, mj));
                }
                if i != centre && j != centre {
                    points.push(IVec2::new(mi, mj));
                }
            } else {
                points.push(IVec2::new(mi, j));
                points.push(IVec2::new(i, mj));
                points.push(IVec2::new(mi, mj));
            }
        }
    }
    points
}

/// Brush cursor state
#[derive(Clone, Debug)]
pub struct Brush {
    cursor: IVec2,
    kind: ParticleKind,
    size: u32,
    max_size: u32,
    mask: Option<Vec<IVec2>>,
}

impl Brush {
    pub fn new(kind: ParticleKind, size: u32, max_size: u32) -> Self {
        let max_size = max_size.max(1);
        let kind = if kind.is_paintable() {
            kind
        } else {
            ParticleKind::Sand
        };
        Self {
            cursor: IVec2::ZERO,
            kind,
            size: size.clamp(1, max_size),
            max_size,
            mask: None,
        }
    }

    pub fn from_config(config: &BrushConfig) -> Self {
        Self::new(config.kind, config.size, config.max_size)
    }

    /// Cursor position in grid coordinates
    pub fn cursor(&self) -> IVec2 {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: IVec2) {
        self.cursor = cursor;
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn color(&self) -> Rgba {
        self.kind.color()
    }

    /// Switch the painted kind; the border kind is refused
    pub fn select_kind(&mut self, kind: ParticleKind) -> bool {
        if !kind.is_paintable() {
            log::warn!("Brush cannot paint {}", kind);
            return false;
        }
        if kind != self.kind {
            log::debug!("Brush kind: {} -> {}", self.kind, kind);
            self.kind = kind;
        }
        true
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Set the diameter, clamped to `1..=max_size`
    pub fn set_size(&mut self, size: u32) {
        let size = size.clamp(1, self.max_size);
        if size != self.size {
            log::debug!("Brush size: {} -> {}", self.size, size);
            self.size = size;
            self.mask = None;
        }
    }

    /// Grow or shrink by one step following the sign of a wheel delta
    pub fn resize(&mut self, delta: i32) {
        match delta.signum() {
            1 => self.set_size(self.size.saturating_add(1)),
            -1 => self.set_size(self.size.saturating_sub(1)),
            _ => {}
        }
    }

    /// Whether the mask for the current size is already computed
    pub fn is_mask_cached(&self) -> bool {
        self.mask.is_some()
    }

    /// Disc offsets for the current size, computed on first use
    pub fn mask(&mut self) -> &[IVec2] {
        let size = self.size;
        self.mask.get_or_insert_with(|| disc_mask(size))
    }

    /// Top-left corner of the brush box
    pub fn origin(&self) -> IVec2 {
        self.cursor - IVec2::splat((self.size / 2) as i32)
    }

    /// Grid cells currently under the brush
    pub fn footprint(&mut self) -> Vec<IVec2> {
        let origin = self.origin();
        self.mask().iter().map(|offset| origin + *offset).collect()
    }

    /// Paint the brush kind under the mask; returns cells written
    pub fn draw(&mut self, canvas: &mut Canvas) -> usize {
        let particle = Particle::of(self.kind);
        let origin = self.origin();
        let mut written = 0;
        for offset in self.mask() {
            if canvas.paint(origin + *offset, particle) {
                written += 1;
            }
        }
        written
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::from_config(&BrushConfig::default())
    }
}
