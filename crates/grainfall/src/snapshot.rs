//! CPU rasteriser for the canvas prefab
//!
//! Fills an RGBA buffer from the merged rectangles, the same list a GPU
//! frontend would submit as quads, and saves it as PNG.

use anyhow::{Context, Result};
use grainfall_core::simulation::Rgba;
use grainfall_core::{Brush, CanvasPrefab, Sandbox};
use std::path::Path;

/// CPU-based renderer that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
}

impl PixelRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Renderer sized to show the whole canvas of `sandbox`
    pub fn for_sandbox(sandbox: &Sandbox) -> Self {
        let (width, height) = sandbox.config().screen_size();
        Self::new(width, height)
    }

    /// Clear to black, then fill every prefab rectangle in draw order
    pub fn render(&mut self, prefab: &CanvasPrefab) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }

        for (rect, color) in prefab.pixel_rects() {
            self.fill(rect.x, rect.y, rect.width, rect.height, color);
        }
    }

    /// Paint the cells under the brush in the brush kind's color
    pub fn draw_brush(&mut self, brush: &mut Brush, particle_size: u32) {
        let color = brush.kind().color();
        for cell in brush.footprint() {
            let (Ok(col), Ok(row)) = (u32::try_from(cell.x), u32::try_from(cell.y)) else {
                continue;
            };
            self.fill(
                col.saturating_mul(particle_size),
                row.saturating_mul(particle_size),
                particle_size,
                particle_size,
                color,
            );
        }
    }

    /// Fill a pixel rectangle, clipped to the image
    fn fill(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.put(px, py, color);
            }
        }
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.buffer[idx..idx + 4].copy_from_slice(&color);
    }

    /// Color at (x, y), `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0; 4];
        color.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(color)
    }

    /// Save the buffer as PNG, creating parent directories
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        use image::{ImageBuffer, Rgba};

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(self.width, self.height, self.buffer.clone())
                .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;
        img.save(path)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        Ok(())
    }
}

/// Render the current prefab of `sandbox` and write it to `path`
pub fn save_snapshot(sandbox: &Sandbox, path: impl AsRef<Path>) -> Result<()> {
    let mut renderer = PixelRenderer::for_sandbox(sandbox);
    renderer.render(sandbox.prefab());
    write_snapshot(&renderer, path.as_ref())
}

/// Like [`save_snapshot`], with the brush cursor drawn over the canvas
pub fn save_snapshot_with_cursor(sandbox: &mut Sandbox, path: impl AsRef<Path>) -> Result<()> {
    let mut renderer = PixelRenderer::for_sandbox(sandbox);
    renderer.render(sandbox.prefab());
    let particle_size = sandbox.config().particle_size;
    renderer.draw_brush(sandbox.brush_mut(), particle_size);
    write_snapshot(&renderer, path.as_ref())
}

fn write_snapshot(renderer: &PixelRenderer, path: &Path) -> Result<()> {
    renderer.save_png(path)?;
    log::info!(
        "Snapshot {}x{} saved to {}",
        renderer.width,
        renderer.height,
        path.display()
    );
    Ok(())
}
