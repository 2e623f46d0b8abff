//! Particle kinds and their fixed palette

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::particle::ParticleFlags;

/// RGBA color, one byte per channel
pub type Rgba = [u8; 4];

/// Every kind of particle a cell can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Permanent frame around the canvas
    Border,
    /// Empty space (never drawn)
    Air,
    Sand,
    Water,
    Stone,
    Wood,
}

impl ParticleKind {
    /// All kinds, in declaration order
    pub const ALL: [ParticleKind; 6] = [
        ParticleKind::Border,
        ParticleKind::Air,
        ParticleKind::Sand,
        ParticleKind::Water,
        ParticleKind::Stone,
        ParticleKind::Wood,
    ];

    /// Kinds a brush may paint, in hotkey order (1-5)
    pub const PAINTABLE: [ParticleKind; 5] = [
        ParticleKind::Air,
        ParticleKind::Sand,
        ParticleKind::Water,
        ParticleKind::Stone,
        ParticleKind::Wood,
    ];

    /// Display name used in logs and debug output
    pub const fn name(self) -> &'static str {
        match self {
            ParticleKind::Border => "border",
            ParticleKind::Air => "air",
            ParticleKind::Sand => "sand",
            ParticleKind::Water => "water",
            ParticleKind::Stone => "stone",
            ParticleKind::Wood => "wood",
        }
    }

    /// Base color of this kind
    pub const fn color(self) -> Rgba {
        match self {
            ParticleKind::Border => [255, 255, 255, 255],
            ParticleKind::Air => [0, 0, 0, 0], // Transparent
            ParticleKind::Sand => [255, 255, 51, 255],
            ParticleKind::Water => [0, 121, 241, 255],
            ParticleKind::Stone => [128, 128, 128, 255],
            ParticleKind::Wood => [139, 69, 19, 255],
        }
    }

    /// Property bits carried by particles of this kind
    pub const fn flags(self) -> ParticleFlags {
        match self {
            ParticleKind::Border => ParticleFlags::empty(),
            ParticleKind::Air => ParticleFlags::INVISIBLE,
            ParticleKind::Sand | ParticleKind::Water => ParticleFlags::AFFECTED_BY_GRAVITY,
            ParticleKind::Stone => ParticleFlags::empty(),
            ParticleKind::Wood => ParticleFlags::FLAMMABLE,
        }
    }

    /// Whether a brush is allowed to paint this kind
    pub fn is_paintable(self) -> bool {
        self != ParticleKind::Border
    }

    /// Kind bound to a numeric hotkey (1-5)
    pub fn from_hotkey(key: u8) -> Option<Self> {
        match key {
            1..=5 => Some(Self::PAINTABLE[(key - 1) as usize]),
            _ => None,
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParticleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown particle kind: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_air_is_invisible() {
        for kind in ParticleKind::ALL {
            assert_eq!(
                kind.flags().contains(ParticleFlags::INVISIBLE),
                kind == ParticleKind::Air,
                "{kind}"
            );
        }
    }

    #[test]
    fn test_gravity_kinds() {
        let falling: Vec<_> = ParticleKind::ALL
            .into_iter()
            .filter(|k| k.flags().contains(ParticleFlags::AFFECTED_BY_GRAVITY))
            .collect();
        assert_eq!(falling, vec![ParticleKind::Sand, ParticleKind::Water]);
    }

    #[test]
    fn test_hotkeys() {
        assert_eq!(ParticleKind::from_hotkey(1), Some(ParticleKind::Air));
        assert_eq!(ParticleKind::from_hotkey(2), Some(ParticleKind::Sand));
        assert_eq!(ParticleKind::from_hotkey(5), Some(ParticleKind::Wood));
        assert_eq!(ParticleKind::from_hotkey(0), None);
        assert_eq!(ParticleKind::from_hotkey(6), None);
    }

    #[test]
    fn test_border_not_paintable() {
        assert!(!ParticleKind::Border.is_paintable());
        assert!(ParticleKind::PAINTABLE.iter().all(|k| k.is_paintable()));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Water".parse::<ParticleKind>(), Ok(ParticleKind::Water));
        assert_eq!("stone".parse::<ParticleKind>(), Ok(ParticleKind::Stone));
        assert!("lava".parse::<ParticleKind>().is_err());
    }

    #[test]
    fn test_ron_names() {
        let kind: ParticleKind = ron::from_str("Sand").unwrap();
        assert_eq!(kind, ParticleKind::Sand);
        assert_eq!(ron::to_string(&ParticleKind::Wood).unwrap(), "Wood");
    }
}
