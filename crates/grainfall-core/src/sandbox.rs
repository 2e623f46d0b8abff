//! Sandbox - owns every piece of simulation state and runs one frame
//!
//! Per frame: input updates the brush and may enqueue work, one queued
//! operation is executed, then the tick clock decides how many physics ticks
//! run. Each tick moves particles and rebuilds the render list.

use glam::IVec2;
use grainfall_simulation::ParticleKind;
use serde::{Deserialize, Serialize};

use crate::brush::Brush;
use crate::canvas::Canvas;
use crate::clock::TickClock;
use crate::config::SandboxConfig;
use crate::error::ConfigError;
use crate::ops::{OpQueue, Operation};
use crate::physics::GravityUpdater;
use crate::prefab::CanvasPrefab;
use crate::stats::MoveCounter;

/// Input gathered by the host for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Scroll wheel movement; only the sign is used
    pub wheel: f32,
    /// Kind chosen this frame, if any
    pub select: Option<ParticleKind>,
    /// Pointer held down
    pub draw: bool,
    /// Pointer position in grid coordinates (x = column, y = row)
    pub cursor: Option<IVec2>,
    /// Request to reset the canvas interior
    pub clear: bool,
}

impl FrameInput {
    /// Input that only holds the pointer down at `cursor`
    pub fn draw_at(cursor: IVec2) -> Self {
        Self {
            draw: true,
            cursor: Some(cursor),
            ..Default::default()
        }
    }
}

/// What one call to [`Sandbox::frame`] did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u32,
    pub op: Option<Operation>,
}

/// Read-only counters for overlays and reports
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugCounters {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub prefab_len: usize,
    pub op_queue_len: usize,
    pub brush_size: u32,
    pub brush_kind: ParticleKind,
    pub cursor: (i32, i32),
    pub tick_count: u64,
    pub particles: usize,
    pub moves_last_tick: u64,
}

/// Simulation context
pub struct Sandbox {
    config: SandboxConfig,
    canvas: Canvas,
    brush: Brush,
    ops: OpQueue,
    clock: TickClock,
    prefab: CanvasPrefab,
    tick_count: u64,
    moves_last_tick: u64,
}

impl Sandbox {
    /// Build a sandbox with a fresh bordered canvas
    pub fn new(config: SandboxConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let canvas = Canvas::new(config.canvas_width, config.canvas_height)?;
        let mut prefab = CanvasPrefab::new(config.particle_size);
        prefab.rebuild(&canvas);

        log::debug!(
            "Sandbox created: {}x{} cells, {} px/cell, {} Hz",
            canvas.width(),
            canvas.height(),
            config.particle_size,
            config.tick_rate
        );

        Ok(Self {
            brush: Brush::from_config(&config.brush),
            clock: TickClock::new(config.tick_rate),
            ops: OpQueue::new(),
            canvas,
            prefab,
            config,
            tick_count: 0,
            moves_last_tick: 0,
        })
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Direct grid access for scripted setup
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    pub fn prefab(&self) -> &CanvasPrefab {
        &self.prefab
    }

    pub fn ops(&self) -> &OpQueue {
        &self.ops
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Queue an operation for a later frame
    pub fn push_operation(&mut self, op: Operation) {
        self.ops.push(op);
    }

    /// Run one frame of `dt` seconds
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> FrameReport {
        self.apply_input(input);
        let op = self.handle_operation();

        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            self.tick();
        }

        FrameReport { ticks, op }
    }

    /// Update the brush from input and enqueue the requested operations
    pub fn apply_input(&mut self, input: &FrameInput) {
        if input.wheel.is_finite() && input.wheel != 0.0 {
            self.brush.resize(if input.wheel > 0.0 { 1 } else { -1 });
        }
        if let Some(kind) = input.select {
            self.brush.select_kind(kind);
        }
        if let Some(cursor) = input.cursor {
            self.brush.set_cursor(cursor);
        }
        if input.clear {
            self.ops.push(Operation::Clear);
        }
        if input.draw {
            self.ops.push(Operation::BrushDraw);
        }
    }

    /// Pop and execute at most one queued operation
    pub fn handle_operation(&mut self) -> Option<Operation> {
        let op = self.ops.pop()?;
        match op {
            Operation::BrushDraw => {
                let written = self.brush.draw(&mut self.canvas);
                log::trace!(
                    "Brush drew {} {} at {}",
                    written,
                    self.brush.kind(),
                    self.brush.cursor()
                );
            }
            Operation::Clear => {
                self.canvas.clear();
                log::debug!("Canvas cleared");
            }
        }
        Some(op)
    }

    /// One physics step followed by a render list rebuild
    pub fn tick(&mut self) {
        let mut stats = MoveCounter::default();
        GravityUpdater::tick(&mut self.canvas, &mut stats);
        self.prefab.rebuild(&self.canvas);

        self.tick_count += 1;
        self.moves_last_tick = stats.moved;
        log::trace!(
            "Tick {}: {} moves, {} rects",
            self.tick_count,
            stats.moved,
            self.prefab.len()
        );
    }

    /// Rebuild the render list without stepping physics
    pub fn refresh_prefab(&mut self) {
        self.prefab.rebuild(&self.canvas);
    }

    pub fn debug_counters(&self) -> DebugCounters {
        let cursor = self.brush.cursor();
        DebugCounters {
            canvas_width: self.canvas.width(),
            canvas_height: self.canvas.height(),
            prefab_len: self.prefab.len(),
            op_queue_len: self.ops.len(),
            brush_size: self.brush.size(),
            brush_kind: self.brush.kind(),
            cursor: (cursor.x, cursor.y),
            tick_count: self.tick_count,
            particles: self.canvas.particle_count(),
            moves_last_tick: self.moves_last_tick,
        }
    }
}
