//! Built-in demo scene for runs without a scenario file
//!
//! Lays out a stone basin with a wooden ledge, then paints a sand mound and a
//! pool of water through the brush so the first ticks show both rules.

use glam::IVec2;
use grainfall_core::simulation::ParticleKind;
use grainfall_core::{FrameInput, Sandbox};

use crate::stroke::line_cells;

/// Paint the demo scene onto the canvas of `sandbox`
///
/// Geometry scales with the canvas, so any size from 16x16 upward works.
pub fn build_demo_scene(sandbox: &mut Sandbox) {
    let (width, height) = (sandbox.canvas().width(), sandbox.canvas().height());
    let canvas = sandbox.canvas_mut();

    // Basin floor and walls
    let floor = height * 3 / 4;
    canvas.fill_rect(floor, 1, height, width, ParticleKind::Stone);
    canvas.fill_rect(floor - height / 6, 1, height / 6, 2, ParticleKind::Stone);
    canvas.fill_rect(
        floor - height / 6,
        width.saturating_sub(3),
        height / 6,
        2,
        ParticleKind::Stone,
    );

    // Wooden ledge on the left third
    canvas.fill_rect(height / 3, width / 8, 1, width / 4, ParticleKind::Wood);

    let size = (width / 20).max(1) as u32;
    paint_line(
        sandbox,
        ParticleKind::Sand,
        size,
        IVec2::new(width as i32 / 4, 2),
        IVec2::new(width as i32 / 4, height as i32 / 3 - 2),
    );
    paint_line(
        sandbox,
        ParticleKind::Water,
        size,
        IVec2::new(width as i32 * 2 / 3, 2),
        IVec2::new(width as i32 * 3 / 4, height as i32 / 4),
    );

    sandbox.refresh_prefab();
    log::info!(
        "Demo scene built: {} particles on {}x{}",
        sandbox.canvas().particle_count(),
        width,
        height
    );
}

/// Hold the brush down along a line, one frame per cell
fn paint_line(sandbox: &mut Sandbox, kind: ParticleKind, size: u32, from: IVec2, to: IVec2) {
    sandbox.brush_mut().select_kind(kind);
    sandbox.brush_mut().set_size(size);

    for point in line_cells(from, to) {
        sandbox.frame(&FrameInput::draw_at(point), 0.0);
    }
}

/// Run `ticks` fixed-duration frames
pub fn run_ticks(sandbox: &mut Sandbox, ticks: u32) {
    let dt = sandbox.clock().tick_duration();
    let idle = FrameInput::default();
    for _ in 0..ticks {
        sandbox.frame(&idle, dt);
    }
}
