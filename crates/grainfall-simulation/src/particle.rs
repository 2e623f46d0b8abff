//! The particle cell value
//!
//! Particles have no identity: moving one means swapping two cell values.

use bitflags::bitflags;

use crate::kinds::{ParticleKind, Rgba};

bitflags! {
    /// Property bits of a particle
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParticleFlags: u8 {
        /// Never drawn
        const INVISIBLE = 1 << 0;
        /// Moved by the gravity step
        const AFFECTED_BY_GRAVITY = 1 << 1;
        const FLAMMABLE = 1 << 2;
        const EXPLOSIVE = 1 << 3;
    }
}

/// A single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub color: Rgba,
    pub flags: ParticleFlags,
    /// Already processed during the current tick
    pub updated: bool,
}

impl Particle {
    pub const BORDER: Particle = Particle::of(ParticleKind::Border);
    pub const AIR: Particle = Particle::of(ParticleKind::Air);
    pub const SAND: Particle = Particle::of(ParticleKind::Sand);
    pub const WATER: Particle = Particle::of(ParticleKind::Water);
    pub const STONE: Particle = Particle::of(ParticleKind::Stone);
    pub const WOOD: Particle = Particle::of(ParticleKind::Wood);

    /// Canonical particle for a kind
    pub const fn of(kind: ParticleKind) -> Self {
        Self {
            kind,
            color: kind.color(),
            flags: kind.flags(),
            updated: false,
        }
    }

    pub fn is_air(&self) -> bool {
        self.kind == ParticleKind::Air
    }

    pub fn is_water(&self) -> bool {
        self.kind == ParticleKind::Water
    }

    pub fn is_border(&self) -> bool {
        self.kind == ParticleKind::Border
    }

    pub fn is_visible(&self) -> bool {
        !self.flags.contains(ParticleFlags::INVISIBLE)
    }

    pub fn falls(&self) -> bool {
        self.flags.contains(ParticleFlags::AFFECTED_BY_GRAVITY)
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::AIR
    }
}

impl From<ParticleKind> for Particle {
    fn from(kind: ParticleKind) -> Self {
        Self::of(kind)
    }
}
