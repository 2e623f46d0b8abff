//! Sandbox configuration - serializable parameters for a simulation instance
//!
//! Every field has a default, so a RON file only needs the values it changes:
//!
//! ```ron
//! (canvas_width: 120, canvas_height: 80, brush: (size: 6, kind: Water))
//! ```

use grainfall_simulation::{CANVAS_SIZE, PARTICLE_SIZE, ParticleKind, TICK_RATE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete sandbox configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Canvas width in particles (including the border columns)
    pub canvas_width: usize,
    /// Canvas height in particles (including the border rows)
    pub canvas_height: usize,
    /// Edge length of one particle in screen pixels
    pub particle_size: u32,
    /// Physics ticks per simulated second
    pub tick_rate: u32,
    /// Initial brush state
    pub brush: BrushConfig,
}

/// Initial brush state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Diameter in particles
    pub size: u32,
    /// Largest diameter the scroll wheel can reach
    pub max_size: u32,
    /// Kind painted on draw
    pub kind: ParticleKind,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_SIZE,
            canvas_height: CANVAS_SIZE,
            particle_size: PARTICLE_SIZE,
            tick_rate: TICK_RATE,
            brush: BrushConfig::default(),
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: 4,
            max_size: 64,
            kind: ParticleKind::Sand,
        }
    }
}

impl SandboxConfig {
    /// Parse and validate a RON document
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field for a usable value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.particle_size == 0 {
            return Err(ConfigError::ZeroParticleSize);
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.brush.size == 0 || self.brush.size > self.brush.max_size {
            return Err(ConfigError::BrushSize {
                size: self.brush.size,
                max_size: self.brush.max_size,
            });
        }
        if !self.brush.kind.is_paintable() {
            return Err(ConfigError::UnpaintableKind(self.brush.kind));
        }
        Ok(())
    }

    /// Window size needed to show the whole canvas, in pixels
    pub fn screen_size(&self) -> (u32, u32) {
        (
            self.canvas_width as u32 * self.particle_size,
            self.canvas_height as u32 * self.particle_size,
        )
    }
}
