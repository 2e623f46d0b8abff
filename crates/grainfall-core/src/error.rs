//! Construction-time errors

use grainfall_simulation::ParticleKind;
use thiserror::Error;

/// Rejected sandbox configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("canvas dimensions must be non-zero (got {width}x{height})")]
    EmptyCanvas { width: usize, height: usize },

    #[error("particle size must be at least 1 pixel")]
    ZeroParticleSize,

    #[error("tick rate must be at least 1 tick per second")]
    ZeroTickRate,

    #[error("brush size {size} is outside 1..={max_size}")]
    BrushSize { size: u32, max_size: u32 },

    #[error("brush cannot paint {0}")]
    UnpaintableKind(ParticleKind),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
