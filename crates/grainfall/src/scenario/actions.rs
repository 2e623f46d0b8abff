//! Scenario actions

use grainfall_core::simulation::ParticleKind;
use serde::{Deserialize, Serialize};

/// One step of a scenario
///
/// Positions are grid coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    // === INPUT ===
    /// One frame selecting a brush kind
    SelectKind { kind: ParticleKind },

    /// One frame per step with the wheel turned by the step's sign
    ResizeBrush { steps: i32 },

    /// One frame moving the cursor without drawing
    MoveCursor { x: i32, y: i32 },

    /// One frame with the pointer held at (x, y)
    Draw { x: i32, y: i32 },

    /// Drag the held pointer along a line, one frame per cell (both ends included)
    Stroke { from: (i32, i32), to: (i32, i32) },

    /// One frame requesting a canvas clear
    Clear,

    // === DIRECT EDITS ===
    /// Write a kind into a rectangle of cells, clipped to the interior
    FillRect {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
        kind: ParticleKind,
    },

    // === TIME ===
    /// Run physics ticks directly, bypassing the clock
    Tick { count: u32 },

    /// Run idle frames of `dt` seconds until `seconds` have elapsed
    Advance { seconds: f32, dt: f32 },

    // === OUTPUT ===
    /// Rasterise the canvas to a PNG under the snapshot directory
    Snapshot { name: String },

    /// Append a message to the execution log
    Log { message: String },
}

impl ScenarioAction {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectKind { .. } => "SelectKind",
            Self::ResizeBrush { .. } => "ResizeBrush",
            Self::MoveCursor { .. } => "MoveCursor",
            Self::Draw { .. } => "Draw",
            Self::Stroke { .. } => "Stroke",
            Self::Clear => "Clear",
            Self::FillRect { .. } => "FillRect",
            Self::Tick { .. } => "Tick",
            Self::Advance { .. } => "Advance",
            Self::Snapshot { .. } => "Snapshot",
            Self::Log { .. } => "Log",
        }
    }
}
