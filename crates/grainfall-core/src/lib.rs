//! Falling-sand simulation core
//!
//! - `canvas`  - bordered particle grid
//! - `physics` - per-tick gravity rules for sand and water
//! - `prefab`  - greedy rectangle coalescing of the grid for rendering
//! - `brush`   - disc-shaped brush mask and grid writes
//! - `ops`     - FIFO of pending input operations
//! - `clock`   - fixed-timestep tick accumulator
//! - `sandbox` - context object owning all of the above

pub mod brush;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod error;
pub mod ops;
pub mod physics;
pub mod prefab;
pub mod sandbox;
pub mod stats;

pub use brush::{Brush, disc_mask};
pub use canvas::Canvas;
pub use clock::TickClock;
pub use config::{BrushConfig, SandboxConfig};
pub use error::ConfigError;
pub use ops::{OpQueue, Operation};
pub use physics::GravityUpdater;
pub use prefab::{CanvasPrefab, CellRect, PixelRect, PrefabRect, coalesce};
pub use sandbox::{DebugCounters, FrameInput, FrameReport, Sandbox};
pub use stats::{MoveCounter, NoopStats, SimStats};

/// Re-export of the particle data crate
pub mod simulation {
    pub use grainfall_simulation::*;
}
