//! # Grainfall - headless falling-sand sandbox
//!
//! Hosts the simulation without a window: scripted scenarios drive the
//! sandbox through the same per-frame input path a windowed frontend would
//! use, and the render list is rasterised to PNG.

pub mod config;
pub mod demo;
pub mod scenario;
pub mod snapshot;
pub mod stroke;

// Re-export core modules for convenience
pub use grainfall_core::simulation;
pub use grainfall_core::{FrameInput, Sandbox, SandboxConfig};

