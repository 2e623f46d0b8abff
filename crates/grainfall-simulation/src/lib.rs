//! Particle data for the grainfall sandbox
//!
//! This crate provides the foundational value types for the simulation:
//! - Particle kinds and their palette (ParticleKind)
//! - Property bits (ParticleFlags)
//! - The Particle cell value stored in the grid

mod kinds;
mod particle;

pub use kinds::{ParticleKind, Rgba};
pub use particle::{Particle, ParticleFlags};

/// Target physics rate in ticks per second
pub const TICK_RATE: u32 = 64;

/// Edge length of one particle in screen pixels
pub const PARTICLE_SIZE: u32 = 2;

/// Default canvas edge length in particles
pub const CANVAS_SIZE: usize = 300;
